//! Library behind the devkit CLIs: `docker-pick` and `spring-deps`.

pub mod commands;
pub mod config;
pub mod docker;
pub mod error;
pub mod logging;
pub mod maven;
pub mod model;
pub mod process;
