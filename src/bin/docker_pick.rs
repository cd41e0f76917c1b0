use clap::{ArgAction, Parser};
use devkit::commands::execute_launch;
use devkit::commands::launch::LaunchOptions;
use devkit::error::AppError;
use devkit::logging;
use devkit::model::{MountMode, Shell};

fn main() {
    match run() {
        Ok(()) => {}
        Err(err @ AppError::Interrupted) => {
            println!("\n{}", err);
            std::process::exit(err.exit_code());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(logging::level_for(false));

    let options = LaunchOptions {
        shell: Shell::from_flags(cli.bash, cli.sh),
        mount: MountMode::from_flags(cli.mount, cli.mount_current),
        image: cli.image,
        verbose: cli.verbose,
    };
    execute_launch(options)
}

#[derive(Parser)]
#[command(
    name = "docker-pick",
    version,
    about = "Pick a local Docker image with a fuzzy finder and run it interactively."
)]
struct Cli {
    /// Use bash as entrypoint (default).
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "sh")]
    bash: bool,

    /// Use sh as entrypoint.
    #[arg(long, action = ArgAction::SetTrue)]
    sh: bool,

    /// Mount ~/docker-mnt/<image> to /mnt/docker-mnt.
    #[arg(short = 'm', long = "mount", action = ArgAction::SetTrue, conflicts_with = "mount_current")]
    mount: bool,

    /// Mount the current directory to /mnt/docker-mnt.
    #[arg(short = 'c', long = "mount-current", visible_alias = "mc", action = ArgAction::SetTrue)]
    mount_current: bool,

    /// Docker image to run (skips the interactive selection).
    #[arg(short = 'i', long = "image", value_name = "IMAGE")]
    image: Option<String>,

    /// Print the docker command instead of executing it.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}
