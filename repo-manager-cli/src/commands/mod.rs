//! CLI command implementations

pub mod clean;
pub mod clone;
pub mod list;

pub use clean::CleanArgs;
pub use clone::CloneArgs;
pub use list::ListArgs;
