//! Rebalance Tools: maintenance tooling for the Rebalance app
//!
//! Two loosely related toolsets share this crate:
//!
//! - **Guarded source patching**: ordered sequences of exact literal
//!   replacements applied to one target file, each step guarded by a
//!   presence check that aborts the whole run. Scripts are one-shot
//!   migrations authored against a known snapshot of the target; a stale or
//!   already-patched file fails loudly instead of being silently corrupted.
//! - **Play Store asset generation**: deterministic rendering of the
//!   1024x500 feature graphic and its variants, aspect-preserving resizing,
//!   preview export, and size reporting.
//!
//! # Architecture
//!
//! The patch engine ([`patch::apply_steps`]) is pure: buffer in, buffer out.
//! All I/O (reading the target, line-ending normalization, baseline
//! fingerprint checks, the atomic write) lives in the script runner
//! ([`script::run_script`]), so nothing reaches disk until every step has
//! succeeded.
//!
//! # Safety
//!
//! - Every step verifies its search literal is present before replacing
//! - Atomic file writes (tempfile + fsync + rename)
//! - Project boundary enforcement for patch targets
//! - Optional baseline fingerprints detect drifted targets before step 1
//!
//! # Example
//!
//! ```
//! use rebalance_tools::patch::{apply_steps, PatchStep};
//!
//! let steps = [PatchStep::first("rename", "foo_old", "foo_new")];
//! let patched = apply_steps("call foo_old()", &steps).unwrap();
//! assert_eq!(patched.text, "call foo_new()");
//!
//! // A second application fails: the search text was consumed.
//! assert!(apply_steps(&patched.text, &steps).is_err());
//! ```

pub mod assets;
pub mod normalize;
pub mod patch;
pub mod safety;
pub mod script;

// Re-exports
pub use assets::{
    export_previews, generate_alternates, generate_feature_graphic, report_sizes, resize_file,
    AssetError, FEATURE_HEIGHT, FEATURE_WIDTH,
};
pub use normalize::normalize_line_endings;
pub use patch::{apply_steps, PatchError, PatchStep, Patched, ReplaceLimit, StepReport};
pub use safety::{ProjectGuard, SafetyError};
pub use script::{
    check_script, run_script, PatchScript, RunError, ScriptError, ScriptOutcome,
};
