pub mod deps;
pub mod launch;

pub use deps::execute_deps;
pub use launch::execute_launch;
