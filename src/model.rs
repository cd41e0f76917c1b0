use std::fmt;

/// Shell used as the container entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    #[default]
    Bash,
    Sh,
}

impl Shell {
    pub fn from_flags(bash: bool, sh: bool) -> Self {
        if sh && !bash { Shell::Sh } else { Shell::Bash }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Sh => "sh",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host directory bound into the launched container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountMode {
    #[default]
    None,
    /// `<mount root>/<image reference>`, created on demand.
    ImageHome,
    CurrentDir,
}

impl MountMode {
    pub fn from_flags(mount: bool, mount_current: bool) -> Self {
        if mount_current {
            MountMode::CurrentDir
        } else if mount {
            MountMode::ImageHome
        } else {
            MountMode::None
        }
    }
}

/// A resolved Maven coordinate. Ordering is group, artifact, then version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Coordinate { group: group.into(), artifact: artifact.into(), version: version.into() }
    }

    pub fn matches(&self, filter: &str) -> bool {
        self.to_string().contains(filter)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_defaults_to_bash() {
        assert_eq!(Shell::from_flags(false, false), Shell::Bash);
        assert_eq!(Shell::from_flags(true, false), Shell::Bash);
        assert_eq!(Shell::from_flags(false, true), Shell::Sh);
    }

    #[test]
    fn mount_current_wins_over_image_home() {
        assert_eq!(MountMode::from_flags(false, false), MountMode::None);
        assert_eq!(MountMode::from_flags(true, false), MountMode::ImageHome);
        assert_eq!(MountMode::from_flags(false, true), MountMode::CurrentDir);
    }

    #[test]
    fn coordinate_matches_on_joined_form() {
        let coord = Coordinate::new("org.springframework", "spring-context", "6.2.6");
        assert!(coord.matches("org.springframework:spring-context"));
        assert!(coord.matches("context:6.2"));
        assert!(!coord.matches("spring-core"));
    }
}
