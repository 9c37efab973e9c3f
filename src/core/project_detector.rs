/// Project root detection logic
///
/// Works out which project the current directory belongs to. The git
/// repository's work tree wins; otherwise we walk up looking for common
/// project markers like Cargo.toml or package.json.

use crate::error::{Result, ScopeError};
use std::path::{Path, PathBuf};

/// Project root detection markers
const PROJECT_MARKERS: &[&str] = &[
    ".git",
    "Cargo.toml",
    "package.json",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "requirements.txt",
    "Gemfile",
    "composer.json",
    ".project",
];

/// Handles project root detection
pub struct ProjectDetector;

impl ProjectDetector {
    /// Detect the project root from a given path
    ///
    /// # Arguments
    /// * `start_path` - The path to start searching from (usually cwd)
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The detected project root, or the start path itself
    ///   when nothing marks a project
    pub fn detect<P: AsRef<Path>>(start_path: P) -> Result<PathBuf> {
        let start_path = start_path.as_ref();

        let absolute_path = if start_path.is_absolute() {
            start_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(start_path)
        };

        if let Some(workdir) = Self::git_workdir(&absolute_path) {
            return Ok(workdir);
        }

        let mut current = absolute_path.as_path();

        loop {
            for marker in PROJECT_MARKERS {
                if current.join(marker).exists() {
                    return Ok(current.to_path_buf());
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                // Reached filesystem root without finding markers
                None => return Ok(absolute_path),
            }
        }
    }

    /// Work tree of the enclosing git repository, if any
    fn git_workdir(path: &Path) -> Option<PathBuf> {
        let repo = git2::Repository::discover(path).ok()?;
        let workdir = repo.workdir()?;
        // git2 hands back a trailing separator
        Some(workdir.components().collect())
    }

    /// Get the project name from the root path
    ///
    /// Uses the directory name as the project name.
    pub fn get_project_name<P: AsRef<Path>>(project_root: P) -> Option<String> {
        project_root
            .as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(|s| s.to_string())
    }
}

/// Supplies the project key scopes are cached under
pub trait ProjectResolver: Send + Sync {
    fn resolve(&self) -> Result<String>;
}

/// Default resolver: the name of the project root around a directory
#[derive(Debug, Clone, Default)]
pub struct CwdProjectResolver {
    start: Option<PathBuf>,
}

impl CwdProjectResolver {
    /// Resolve from the process's working directory at call time
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve from a fixed starting directory
    pub fn from_path<P: AsRef<Path>>(start: P) -> Self {
        Self {
            start: Some(start.as_ref().to_path_buf()),
        }
    }
}

impl ProjectResolver for CwdProjectResolver {
    fn resolve(&self) -> Result<String> {
        let start = match &self.start {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        let root = ProjectDetector::detect(&start)?;
        ProjectDetector::get_project_name(&root)
            .ok_or_else(|| ScopeError::ProjectNotResolved(root.display().to_string()))
    }
}

/// Always resolves to the same name
#[derive(Debug, Clone)]
pub struct FixedProject(pub String);

impl ProjectResolver for FixedProject {
    fn resolve(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

impl<F> ProjectResolver for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn resolve(&self) -> Result<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_marker_project() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("my-project");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join("Cargo.toml"), "[package]").unwrap();

        let sub_dir = project_dir.join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        // Should detect from subdirectory
        let detected = ProjectDetector::detect(&sub_dir).unwrap();
        assert_eq!(detected, project_dir);
    }

    #[test]
    fn test_detect_git_repository() {
        let temp = TempDir::new().unwrap();
        let repo_dir = temp.path().join("widget");
        git2::Repository::init(&repo_dir).unwrap();

        let nested = repo_dir.join("crates").join("core");
        fs::create_dir_all(&nested).unwrap();
        // An inner marker must not shadow the repository root
        fs::write(repo_dir.join("crates").join("Cargo.toml"), "[workspace]").unwrap();

        let detected = ProjectDetector::detect(&nested).unwrap();
        assert_eq!(
            detected.canonicalize().unwrap(),
            repo_dir.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_no_project_found() {
        let temp = TempDir::new().unwrap();
        let sub_dir = temp.path().join("no-markers");
        fs::create_dir(&sub_dir).unwrap();

        // Should fall back to the original directory
        let detected = ProjectDetector::detect(&sub_dir).unwrap();
        assert_eq!(detected, sub_dir);
    }

    #[test]
    fn test_get_project_name() {
        let path = PathBuf::from("/home/user/my-awesome-project");
        let name = ProjectDetector::get_project_name(&path).unwrap();
        assert_eq!(name, "my-awesome-project");

        assert!(ProjectDetector::get_project_name("/").is_none());
    }

    #[test]
    fn test_cwd_resolver_uses_root_name() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("widget");
        fs::create_dir_all(project_dir.join("src")).unwrap();
        fs::write(project_dir.join("go.mod"), "module widget").unwrap();

        let resolver = CwdProjectResolver::from_path(project_dir.join("src"));
        assert_eq!(resolver.resolve().unwrap(), "widget");
    }

    #[test]
    fn test_injected_resolvers() {
        let fixed = FixedProject("alpha".to_string());
        assert_eq!(fixed.resolve().unwrap(), "alpha");

        let closure = || -> Result<String> { Ok("beta".to_string()) };
        assert_eq!(closure.resolve().unwrap(), "beta");
    }
}
