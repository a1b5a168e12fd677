//! Patch script runner - the I/O shell around the pure engine.
//!
//! A run is all-or-nothing with respect to the target file on disk: the
//! buffer is read once, normalized, checked against the optional baseline
//! fingerprint, patched fully in memory, and only then written back
//! atomically. Any failure along the way leaves the file byte-identical to
//! its prior state.

use crate::normalize::normalize_line_endings;
use crate::patch::{apply_steps, PatchError, StepReport};
use crate::safety::{ProjectGuard, SafetyError};
use crate::script::schema::{parse_baseline_hash, PatchScript};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("target file not found: {0}")]
    TargetMissing(PathBuf),

    #[error(transparent)]
    Safety(#[from] SafetyError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid baseline_hash '{0}' (expected a 64-bit hex value)")]
    InvalidBaseline(String),

    /// The normalized target no longer matches the snapshot the script was
    /// authored against. Refusing to guess; re-derive the script against the
    /// current file.
    #[error("target has drifted from the script baseline ({path}: expected xxh3 {expected}, found {found})")]
    BaselineDrift {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// The computed result of a script run, before or after persistence.
#[derive(Debug, Clone)]
#[must_use = "the outcome carries the patched buffer; check changed() and persist if appropriate"]
pub struct ScriptOutcome {
    /// Canonical path of the target file.
    pub file: PathBuf,
    /// Per-step replacement counts, in script order.
    pub reports: Vec<StepReport>,
    /// Target content as read from disk (line endings unmodified).
    pub original: String,
    /// Fully patched, normalized content.
    pub patched: String,
}

impl ScriptOutcome {
    /// Whether persisting would change the file (patching or normalization).
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }
}

/// Compute a script's effect without touching the filesystem beyond reads.
///
/// Used by `status` and `--dry-run`; `run_script` is this plus a persist.
pub fn check_script(script: &PatchScript, project_root: &Path) -> Result<ScriptOutcome, RunError> {
    let guard = ProjectGuard::new(project_root)?;

    let candidate = if Path::new(&script.meta.file).is_absolute() {
        PathBuf::from(&script.meta.file)
    } else {
        guard.project_root().join(&script.meta.file)
    };
    if !candidate.exists() {
        return Err(RunError::TargetMissing(candidate));
    }

    let target = guard.validate_path(&script.meta.file)?;

    let original = fs::read_to_string(&target).map_err(|source| RunError::Io {
        path: target.clone(),
        source,
    })?;
    let normalized = normalize_line_endings(&original).into_owned();

    if let Some(expected) = &script.meta.baseline_hash {
        let expected_value = parse_baseline_hash(expected)
            .ok_or_else(|| RunError::InvalidBaseline(expected.clone()))?;
        let actual = xxh3_64(normalized.as_bytes());
        if actual != expected_value {
            return Err(RunError::BaselineDrift {
                path: target,
                expected: format!("{expected_value:016x}"),
                found: format!("{actual:016x}"),
            });
        }
    }

    let patched = apply_steps(&normalized, &script.to_steps())?;

    Ok(ScriptOutcome {
        file: target,
        reports: patched.reports,
        original,
        patched: patched.text,
    })
}

/// Run a script against the project: compute the patch, then commit it.
///
/// The write is atomic (tempfile + fsync + rename), so a crash mid-run can
/// never leave the target partially patched. The mtime is bumped so file
/// watchers and incremental builds pick up the change.
pub fn run_script(script: &PatchScript, project_root: &Path) -> Result<ScriptOutcome, RunError> {
    let outcome = check_script(script, project_root)?;

    if outcome.changed() {
        atomic_write(&outcome.file, outcome.patched.as_bytes()).map_err(|source| RunError::Io {
            path: outcome.file.clone(),
            source,
        })?;

        let now = filetime::FileTime::now();
        filetime::set_file_mtime(&outcome.file, now).map_err(|source| RunError::Io {
            path: outcome.file.clone(),
            source,
        })?;
    }

    Ok(outcome)
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or nothing changes.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Create the tempfile in the same directory to stay on one filesystem
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no parent directory",
        )
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
