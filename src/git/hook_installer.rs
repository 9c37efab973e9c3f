/// Hook installer
///
/// Handles installation and removal of the git prepare-commit-msg hook.

use crate::error::{Result, ScopeError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Hook file contents embedded at compile time
const HOOK_SCRIPT: &str = include_str!("../../hooks/prepare-commit-msg.sh");

/// Line identifying hooks we wrote
const HOOK_MARKER: &str = "# commit-scopes hook (auto-generated)";

pub const HOOK_NAME: &str = "prepare-commit-msg";

/// Hook installer for one repository
pub struct HookInstaller {
    hooks_dir: PathBuf,
}

impl HookInstaller {
    /// Find the repository around `start` and its hooks directory
    ///
    /// Honours `core.hooksPath`; relative values resolve against the work tree.
    pub fn discover<P: AsRef<Path>>(start: P) -> Result<Self> {
        let repo = git2::Repository::discover(start.as_ref())?;

        let configured = repo
            .config()
            .ok()
            .and_then(|config| config.get_path("core.hooksPath").ok());

        let hooks_dir = match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => repo.workdir().unwrap_or_else(|| repo.path()).join(path),
            None => repo.path().join("hooks"),
        };

        Ok(Self { hooks_dir })
    }

    /// Installer writing into an explicit hooks directory
    pub fn with_hooks_dir<P: AsRef<Path>>(hooks_dir: P) -> Self {
        Self {
            hooks_dir: hooks_dir.as_ref().to_path_buf(),
        }
    }

    pub fn hook_path(&self) -> PathBuf {
        self.hooks_dir.join(HOOK_NAME)
    }

    /// Install the hook
    ///
    /// # Arguments
    /// * `force` - Replace a hook that commit-scopes did not write
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Where the hook now lives
    /// * `Err(ScopeError::HookConflict)` - A foreign hook is in the way
    pub fn install(&self, force: bool) -> Result<PathBuf> {
        let hook_path = self.hook_path();

        if hook_path.exists() && !self.is_installed() && !force {
            return Err(ScopeError::HookConflict(hook_path));
        }

        fs::create_dir_all(&self.hooks_dir)?;
        fs::write(&hook_path, HOOK_SCRIPT)?;

        // Make hook executable (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&hook_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&hook_path, perms)?;
        }

        info!(path = %hook_path.display(), "installed hook");
        Ok(hook_path)
    }

    /// Remove the hook if we own it
    ///
    /// # Returns
    /// * `Ok(true)` - Removed
    /// * `Ok(false)` - No hook of ours was there
    pub fn uninstall(&self) -> Result<bool> {
        if !self.is_installed() {
            return Ok(false);
        }

        let hook_path = self.hook_path();
        fs::remove_file(&hook_path)?;
        info!(path = %hook_path.display(), "removed hook");
        Ok(true)
    }

    /// Whether the hook file exists and was written by us
    pub fn is_installed(&self) -> bool {
        fs::read_to_string(self.hook_path())
            .map(|content| content.contains(HOOK_MARKER))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_installer() -> (HookInstaller, TempDir) {
        let temp = TempDir::new().unwrap();
        let installer = HookInstaller::with_hooks_dir(temp.path().join("hooks"));
        (installer, temp)
    }

    #[test]
    fn test_hook_script() {
        assert!(HOOK_SCRIPT.starts_with("#!/bin/sh"));
        assert!(HOOK_SCRIPT.contains(HOOK_MARKER));
        assert!(HOOK_SCRIPT.contains("commit-scopes prepare-commit-msg \"$@\""));
    }

    #[test]
    fn test_install_and_uninstall() {
        let (installer, _temp) = create_test_installer();
        assert!(!installer.is_installed());

        let path = installer.install(false).unwrap();
        assert!(path.exists());
        assert!(installer.is_installed());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }

        // Reinstalling over our own hook is fine
        installer.install(false).unwrap();

        assert!(installer.uninstall().unwrap());
        assert!(!path.exists());
        assert!(!installer.uninstall().unwrap());
    }

    #[test]
    fn test_foreign_hook_is_kept() {
        let (installer, _temp) = create_test_installer();
        fs::create_dir_all(installer.hook_path().parent().unwrap()).unwrap();
        fs::write(installer.hook_path(), "#!/bin/sh\necho mine\n").unwrap();

        match installer.install(false) {
            Err(ScopeError::HookConflict(_)) => {}
            other => panic!("Expected HookConflict, got {:?}", other),
        }
        assert!(!installer.uninstall().unwrap());
        assert!(installer.hook_path().exists());

        installer.install(true).unwrap();
        assert!(installer.is_installed());
    }

    #[test]
    fn test_discover_repository() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        let nested = temp.path().join("src");
        fs::create_dir(&nested).unwrap();

        let installer = HookInstaller::discover(&nested).unwrap();
        assert_eq!(installer.hook_path(), repo.path().join("hooks").join(HOOK_NAME));
    }

    #[test]
    fn test_discover_honours_hooks_path() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        repo.config()
            .unwrap()
            .set_str("core.hooksPath", ".githooks")
            .unwrap();

        let installer = HookInstaller::discover(temp.path()).unwrap();
        let expected = repo.workdir().unwrap().join(".githooks").join(HOOK_NAME);
        assert_eq!(installer.hook_path(), expected);
    }

    #[test]
    fn test_discover_outside_repository() {
        let temp = TempDir::new().unwrap();
        assert!(HookInstaller::discover(temp.path()).is_err());
    }
}
