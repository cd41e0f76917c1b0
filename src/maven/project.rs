use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::maven::pom::PomTemplate;
use crate::process;

/// A dependency whose resolved version gets reported.
#[derive(Debug, Clone, Copy)]
pub struct Interest {
    pub label: &'static str,
    pub filter: &'static str,
}

/// One throwaway Maven project resolved for a framework release.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub dir_name: &'static str,
    pub template: PomTemplate,
    pub interests: &'static [Interest],
}

pub const SPRING_BOOT: Variant = Variant {
    name: "Spring Boot",
    dir_name: "spring-boot-temp-project",
    template: PomTemplate::SpringBoot,
    interests: &[
        Interest { label: "Spring framework", filter: "org.springframework:spring-context" },
        Interest { label: "Jackson", filter: "com.fasterxml.jackson.core:jackson-core" },
        Interest { label: "Log4J", filter: "org.apache.logging.log4j:log4j-api" },
    ],
};

pub const SPRING_CLOUD: Variant = Variant {
    name: "Spring Cloud",
    dir_name: "spring-cloud-temp-project",
    template: PomTemplate::SpringCloud,
    interests: &[Interest { label: "Bouncy Castle", filter: "org.bouncycastle" }],
};

impl Variant {
    pub fn project_dir(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(self.dir_name)
    }
}

/// Recreate `dir` from scratch with a `pom.xml` for `version`.
pub fn write_project(dir: &Path, variant: &Variant, version: &str) -> Result<PathBuf, AppError> {
    remove_project(dir)?;
    fs::create_dir_all(dir)?;
    let pom = dir.join("pom.xml");
    fs::write(&pom, variant.template.render(version))?;
    debug!("wrote {}", pom.display());
    Ok(pom)
}

/// Returns whether anything was removed.
pub fn remove_project(dir: &Path) -> Result<bool, AppError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(AppError::Io(err)),
    }
}

/// Run `dependency:tree` in `dir` and return its stdout.
///
/// Spawn failures and non-zero exits both surface as [`AppError::BuildTool`].
pub fn dependency_tree(maven: &str, dir: &Path) -> Result<String, AppError> {
    let output = process::capture(maven, &["dependency:tree", "-DoutputType=text"], Some(dir))
        .map_err(|err| AppError::BuildTool(format!("Failed to run '{maven}': {err}")))?;
    if !output.success() {
        return Err(AppError::BuildTool(output.failure_text()));
    }
    Ok(output.stdout)
}
