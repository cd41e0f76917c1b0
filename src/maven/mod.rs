//! Maven plumbing: throwaway projects, `dependency:tree` parsing, Maven Central lookups.

pub mod central;
pub mod pom;
pub mod project;
pub mod tree;

pub use central::Central;
pub use project::{SPRING_BOOT, SPRING_CLOUD, Variant};
pub use tree::{find_dependency, parse_dependency_tree};
