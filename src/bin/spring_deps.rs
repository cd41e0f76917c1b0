use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use devkit::commands::deps::DepsOptions;
use devkit::commands::execute_deps;
use devkit::error::AppError;
use devkit::logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let Some(boot) = cli.boot else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    logging::init(logging::level_for(cli.verbose));

    let options = DepsOptions {
        boot,
        cloud: cli.cloud,
        keep: cli.keep,
        offline: cli.offline,
        work_dir: cli.work_dir,
    };
    execute_deps(options)
}

#[derive(Parser)]
#[command(
    name = "spring-deps",
    version,
    about = "List a few transitive dependency versions of a Spring Boot release."
)]
struct Cli {
    /// Spring Boot version to resolve (e.g. 3.4.5).
    #[arg(short = 'b', long = "spring-boot", visible_alias = "sb", value_name = "VERSION")]
    boot: Option<String>,

    /// Spring Cloud version to resolve as well (e.g. 2024.0.1).
    #[arg(short = 'c', long = "spring-cloud", visible_alias = "sc", value_name = "VERSION")]
    cloud: Option<String>,

    /// Keep the temporary Maven projects after the run.
    #[arg(short = 'k', long = "keep", action = ArgAction::SetTrue)]
    keep: bool,

    /// Skip the Maven Central lookups.
    #[arg(long = "offline", action = ArgAction::SetTrue)]
    offline: bool,

    /// Directory in which the temporary projects are created.
    #[arg(short = 'w', long = "work-dir", value_name = "DIR")]
    work_dir: Option<PathBuf>,

    /// Log spawned commands and fetched URLs.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}
