use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boundary checks to keep patch targets inside the app project tree.
///
/// Patch scripts name files relative to the project root. A script authored
/// with a bad path (or a symlink placed in the tree) must never cause a write
/// outside the project, or into generated-artifact directories that the
/// toolchain owns.
#[derive(Debug, Clone)]
pub struct ProjectGuard {
    /// Absolute path to the project root
    project_root: PathBuf,
    /// Canonical paths to forbidden directories
    forbidden_paths: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("path is outside the project: {path} (project: {project})")]
    OutsideProject { path: PathBuf, project: PathBuf },

    #[error("path is in a generated or cache directory: {path} (forbidden: {forbidden})")]
    ForbiddenPath { path: PathBuf, forbidden: PathBuf },

    #[error("failed to canonicalize path: {0}")]
    Canonicalize(#[from] std::io::Error),
}

impl ProjectGuard {
    /// Create a guard rooted at the given project directory.
    ///
    /// The root is canonicalized so symlinked checkouts behave correctly.
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self, SafetyError> {
        let project_root = project_root.as_ref().canonicalize()?;

        let mut forbidden_paths = Vec::new();

        // ~/.pub-cache - Dart/Flutter package sources
        if let Some(home) = home::home_dir() {
            if let Ok(pub_cache) = home.join(".pub-cache").canonicalize() {
                forbidden_paths.push(pub_cache);
            }
        }

        // Generated directories within the project
        for generated in ["build", ".dart_tool"] {
            if let Ok(dir) = project_root.join(generated).canonicalize() {
                forbidden_paths.push(dir);
            }
        }

        Ok(Self {
            project_root,
            forbidden_paths,
        })
    }

    /// Check if a path is safe to patch.
    ///
    /// Relative paths resolve against the project root. Returns the
    /// canonicalized absolute path if safe.
    pub fn validate_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, SafetyError> {
        let path = path.as_ref();

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        };

        // Canonicalize to resolve symlinks and .. components
        let canonical = absolute.canonicalize()?;

        self.check_canonical(&canonical)?;

        Ok(canonical)
    }

    fn check_canonical(&self, canonical: &Path) -> Result<(), SafetyError> {
        if !canonical.starts_with(&self.project_root) {
            return Err(SafetyError::OutsideProject {
                path: canonical.to_path_buf(),
                project: self.project_root.clone(),
            });
        }

        for forbidden in &self.forbidden_paths {
            if canonical.starts_with(forbidden) {
                return Err(SafetyError::ForbiddenPath {
                    path: canonical.to_path_buf(),
                    forbidden: forbidden.clone(),
                });
            }
        }

        Ok(())
    }

    /// Get the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}
