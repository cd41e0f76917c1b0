use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::config::{Config, DepsConfig};
use crate::error::AppError;
use crate::maven::project::{dependency_tree, remove_project, write_project};
use crate::maven::{Central, SPRING_BOOT, SPRING_CLOUD, Variant, find_dependency, parse_dependency_tree};
use crate::model::Coordinate;

const COMPRESS_GROUP: &str = "org.apache.commons";
const COMPRESS_ARTIFACT: &str = "commons-compress";
const IO_GROUP: &str = "commons-io";
const IO_ARTIFACT: &str = "commons-io";

pub struct DepsOptions {
    pub boot: String,
    pub cloud: Option<String>,
    pub keep: bool,
    pub offline: bool,
    pub work_dir: Option<PathBuf>,
}

pub fn execute_deps(options: DepsOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let work_dir = match options.work_dir.clone() {
        Some(dir) => dir,
        None => config.deps.work_dir()?,
    };

    if !options.offline {
        report_central(&config.deps);
        println!();
    }

    let boot_dir = SPRING_BOOT.project_dir(&work_dir);
    let cloud_dir = SPRING_CLOUD.project_dir(&work_dir);

    let resolved = report_variants(&config.deps, &options, &boot_dir, &cloud_dir);

    let cleaned = if options.keep {
        Ok(())
    } else {
        println!("Removing temporary directories...");
        remove_projects(&[boot_dir.as_path(), cloud_dir.as_path()])
    };

    resolved.and(cleaned)
}

fn report_variants(
    config: &DepsConfig,
    options: &DepsOptions,
    boot_dir: &Path,
    cloud_dir: &Path,
) -> Result<(), AppError> {
    let boot_resolved = report_variant(config, &SPRING_BOOT, &options.boot, boot_dir)?;
    if boot_resolved && let Some(cloud) = &options.cloud {
        println!();
        report_variant(config, &SPRING_CLOUD, cloud, cloud_dir)?;
    }
    Ok(())
}

/// Try every directory; the first failure is returned once all were attempted.
fn remove_projects(dirs: &[&Path]) -> Result<(), AppError> {
    let mut first_error = None;
    for dir in dirs {
        if let Err(err) = remove_project(dir) {
            warn!("Failed to remove {}: {err}", dir.display());
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn report_central(config: &DepsConfig) {
    println!("Dependencies from Maven Central:");
    let central = match Central::new(config) {
        Ok(central) => Some(central),
        Err(err) => {
            warn!("Unable to create HTTP client: {err}");
            None
        }
    };

    let latest = central.as_ref().and_then(|central| {
        central
            .latest_version(COMPRESS_GROUP, COMPRESS_ARTIFACT)
            .map_err(|err| warn!("Failed to fetch the latest {COMPRESS_ARTIFACT} version: {err}"))
            .ok()
    });
    println!("  - Latest {COMPRESS_ARTIFACT} available: {}", or_unknown(latest.as_deref()));

    let io_version = match (&central, &latest) {
        (Some(central), Some(version)) => central
            .declared_dependency_version(
                COMPRESS_GROUP,
                COMPRESS_ARTIFACT,
                version,
                IO_GROUP,
                IO_ARTIFACT,
            )
            .unwrap_or_else(|err| {
                warn!("Failed to read the {COMPRESS_ARTIFACT} {version} POM: {err}");
                None
            }),
        _ => None,
    };
    println!("  - {IO_ARTIFACT} version: {}", or_unknown(io_version.as_deref()));
}

/// Generate, resolve and report one variant. `Ok(false)` when Maven failed.
fn report_variant(
    config: &DepsConfig,
    variant: &Variant,
    version: &str,
    dir: &Path,
) -> Result<bool, AppError> {
    println!("Generating {} {} project", variant.name, version);
    write_project(dir, variant, version)?;

    println!("Running Maven to resolve dependencies...");
    let output = match resolve_with_spinner(&config.maven, dir) {
        Ok(output) => output,
        Err(err @ AppError::BuildTool(_)) => {
            println!("{err}");
            return Ok(false);
        }
        Err(err) => return Err(err),
    };

    println!("Resolved dependencies:");
    let deps = parse_dependency_tree(&output);
    for interest in variant.interests {
        println!("{}", dependency_version_line(&deps, interest.label, interest.filter));
    }
    Ok(true)
}

fn resolve_with_spinner(maven: &str, dir: &Path) -> Result<String, AppError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("mvn dependency:tree");
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = dependency_tree(maven, dir);
    spinner.finish_and_clear();
    result
}

pub fn dependency_version_line(deps: &BTreeSet<Coordinate>, label: &str, filter: &str) -> String {
    match find_dependency(deps, filter) {
        Some(coordinate) => format!("  - {label} version: {}", coordinate.version),
        None => format!("  No version found for {filter} in the dependencies."),
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_projects_attempts_every_directory() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let project = temp.path().join("project");
        std::fs::create_dir_all(project.join("target")).unwrap();

        let result = remove_projects(&[blocker.as_path(), project.as_path()]);

        assert!(matches!(result, Err(AppError::Io(_))));
        assert!(!project.exists());
    }

    #[test]
    fn version_line_reports_match() {
        let mut deps = BTreeSet::new();
        deps.insert(Coordinate::new("org.bouncycastle", "bcprov-jdk18on", "1.80"));
        assert_eq!(
            dependency_version_line(&deps, "Bouncy Castle", "org.bouncycastle"),
            "  - Bouncy Castle version: 1.80"
        );
    }

    #[test]
    fn version_line_reports_absence() {
        let deps = BTreeSet::new();
        assert_eq!(
            dependency_version_line(&deps, "Jackson", "com.fasterxml.jackson.core:jackson-core"),
            "  No version found for com.fasterxml.jackson.core:jackson-core in the dependencies."
        );
    }
}
