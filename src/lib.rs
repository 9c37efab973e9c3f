/// commit-scopes library
///
/// Composes `type(scope): summary` commit headers and remembers the scopes
/// used in each project.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod git;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{Result, ScopeError};
