/// Git integration
///
/// Installs the prepare-commit-msg hook and runs the composer when git
/// calls it.

pub mod hook_installer;
pub mod prepare_commit_msg;

pub use hook_installer::HookInstaller;
pub use prepare_commit_msg::{prepare_commit_msg, MessageSource};
