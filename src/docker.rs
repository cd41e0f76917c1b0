use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::LauncherConfig;
use crate::error::AppError;
use crate::model::{MountMode, Shell};
use crate::process;

const IMAGE_FORMAT: &str = "{{.Repository}}:{{.Tag}}\t{{.CreatedSince}}";

/// List non-dangling local images as `repo:tag<TAB>created-since` entries.
pub fn list_images(docker: &str) -> Result<Vec<String>, AppError> {
    let output = process::capture(
        docker,
        &["image", "ls", "--filter", "dangling=false", "--format", IMAGE_FORMAT],
        None,
    )
    .map_err(|err| AppError::ContainerRuntime(format!("Failed to run '{docker}': {err}")))?;

    if !output.success() {
        return Err(AppError::ContainerRuntime(format!(
            "'{docker} image ls' failed: {}",
            output.failure_text()
        )));
    }

    Ok(parse_image_listing(&output.stdout))
}

pub fn parse_image_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

/// The image reference is everything before the first tab.
pub fn image_from_entry(entry: &str) -> &str {
    entry.split('\t').next().unwrap_or(entry).trim()
}

/// Host directory for `image` under `root`. Absolute refs and `..` components are rejected.
pub fn image_mount_dir(root: &Path, image: &str) -> Result<PathBuf, AppError> {
    let mut dir = root.to_path_buf();
    for component in Path::new(image).components() {
        match component {
            Component::Normal(part) => dir.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AppError::InvalidImage(image.to_string()));
            }
        }
    }
    if dir == root {
        return Err(AppError::InvalidImage(image.to_string()));
    }
    Ok(dir)
}

/// Compose `docker run` for `image`. [`MountMode::ImageHome`] creates the host directory.
///
/// `cwd` is only consulted for [`MountMode::CurrentDir`]; `None` means the process working directory.
pub fn build_run_command(
    config: &LauncherConfig,
    shell: Shell,
    mount: MountMode,
    image: &str,
    cwd: Option<&Path>,
) -> Result<Vec<String>, AppError> {
    let mut argv: Vec<String> = vec![
        config.docker.clone(),
        "run".into(),
        "--rm".into(),
        "-it".into(),
        "--entrypoint".into(),
        shell.as_str().into(),
    ];

    match mount {
        MountMode::None => {}
        MountMode::CurrentDir => {
            let cwd = match cwd {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir()?,
            };
            argv.push("-v".into());
            argv.push(format!("{}:{}", cwd.display(), config.mount_target));
        }
        MountMode::ImageHome => {
            let host = image_mount_dir(&config.mount_root()?, image)?;
            fs::create_dir_all(&host)?;
            debug!("mount directory ready at {}", host.display());
            argv.push("-v".into());
            argv.push(format!("{}:{}", host.display(), config.mount_target));
        }
    }

    argv.push(image.to_string());
    Ok(argv)
}

/// Shell-quoted form of `argv`, suitable for copy-paste.
pub fn render_command(argv: &[String]) -> String {
    shell_words::join(argv)
}

/// Replace the current process with `argv`. Only returns on failure.
#[cfg(unix)]
pub fn launch(argv: &[String]) -> Result<(), AppError> {
    use std::os::unix::process::CommandExt;

    let (program, args) = argv
        .split_first()
        .ok_or_else(|| AppError::ContainerRuntime("Empty run command".to_string()))?;
    debug!("exec {}", render_command(argv));
    let err = Command::new(program).args(args).exec();
    Err(AppError::ContainerRuntime(format!("Failed to run '{program}': {err}")))
}

#[cfg(not(unix))]
pub fn launch(argv: &[String]) -> Result<(), AppError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| AppError::ContainerRuntime("Empty run command".to_string()))?;
    debug!("spawn {}", render_command(argv));
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|err| AppError::ContainerRuntime(format!("Failed to run '{program}': {err}")))?;
    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher_config(root: &Path) -> LauncherConfig {
        LauncherConfig {
            mount_root: root.display().to_string(),
            ..LauncherConfig::default()
        }
    }

    #[test]
    fn listing_drops_blank_lines() {
        let entries = parse_image_listing("alpine:3.20\t2 weeks ago\n\nubuntu:24.04\t3 months ago\n");
        assert_eq!(entries, vec!["alpine:3.20\t2 weeks ago", "ubuntu:24.04\t3 months ago"]);
        assert!(parse_image_listing("\n  \n").is_empty());
    }

    #[test]
    fn entry_strips_created_column() {
        assert_eq!(image_from_entry("ghcr.io/org/tool:1.2\t5 days ago"), "ghcr.io/org/tool:1.2");
        assert_eq!(image_from_entry("busybox:latest"), "busybox:latest");
    }

    #[test]
    fn plain_command_has_no_mount() {
        let temp = tempfile::tempdir().unwrap();
        let argv = build_run_command(
            &launcher_config(temp.path()),
            Shell::Sh,
            MountMode::None,
            "alpine:3.20",
            Some(Path::new("/work")),
        )
        .unwrap();
        assert_eq!(argv, ["docker", "run", "--rm", "-it", "--entrypoint", "sh", "alpine:3.20"]);
    }

    #[test]
    fn current_dir_mount_uses_cwd() {
        let temp = tempfile::tempdir().unwrap();
        let argv = build_run_command(
            &launcher_config(temp.path()),
            Shell::Bash,
            MountMode::CurrentDir,
            "alpine:3.20",
            Some(Path::new("/work/project")),
        )
        .unwrap();
        assert_eq!(&argv[6..], ["-v", "/work/project:/mnt/docker-mnt", "alpine:3.20"]);
    }

    #[test]
    fn image_home_mount_creates_host_directory() {
        let temp = tempfile::tempdir().unwrap();
        let argv = build_run_command(
            &launcher_config(temp.path()),
            Shell::Bash,
            MountMode::ImageHome,
            "library/redis:7",
            None,
        )
        .unwrap();

        let host = temp.path().join("library/redis:7");
        assert!(host.is_dir());
        assert_eq!(argv[7], format!("{}:/mnt/docker-mnt", host.display()));
        assert_eq!(argv.last().map(String::as_str), Some("library/redis:7"));
    }

    #[test]
    fn image_home_mount_stays_under_root() {
        let temp = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let config = launcher_config(temp.path());

        for image in [outside.path().to_str().unwrap(), "../escape:1", "repo/../../up", ".", ""] {
            let result = build_run_command(&config, Shell::Bash, MountMode::ImageHome, image, None);
            assert!(matches!(result, Err(AppError::InvalidImage(_))), "accepted {image:?}");
        }
        assert!(!temp.path().parent().unwrap().join("escape:1").exists());
    }

    #[test]
    fn mount_dir_keeps_nested_repository_path() {
        let root = Path::new("/mnt/root");
        assert_eq!(
            image_mount_dir(root, "./ghcr.io/org/tool:1.2").unwrap(),
            root.join("ghcr.io/org/tool:1.2")
        );
    }

    #[test]
    fn rendered_command_quotes_spaces() {
        let argv: Vec<String> =
            ["docker", "run", "-v", "/home/me/my dir:/mnt/docker-mnt", "alpine"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        assert_eq!(render_command(&argv), "docker run -v '/home/me/my dir:/mnt/docker-mnt' alpine");
    }

    #[cfg(unix)]
    #[test]
    fn failing_runtime_is_reported() {
        let result = list_images("false");
        assert!(matches!(result, Err(AppError::ContainerRuntime(_))));
    }
}
