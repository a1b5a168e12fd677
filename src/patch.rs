//! The guarded literal patch engine.
//!
//! Every patch script compiles down to an ordered list of [`PatchStep`]s
//! applied by [`apply_steps`]. Each step verifies its search literal is
//! present in the current buffer before replacing; a missing literal aborts
//! the whole sequence. The engine is pure; committing the result to disk
//! lives in [`crate::script::runner`].
//!
//! This is a precondition-checked migration, not a diff tool: matching is
//! exact-literal only, and a stale or already-patched buffer must fail
//! loudly rather than be silently double-patched.

use thiserror::Error;

/// How many occurrences a step may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceLimit {
    /// Replace only the leftmost occurrence.
    #[default]
    First,
    /// Replace every occurrence, leftmost first.
    All,
}

/// One unit of guarded replacement within an ordered sequence.
///
/// Steps are hand-authored against a known snapshot of the target file; each
/// step assumes the buffer state left by all prior steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchStep {
    /// Human-readable identifier, used in error and progress reporting.
    pub id: String,
    /// Exact literal to find. Must be non-empty.
    pub search: String,
    /// Exact literal to substitute.
    pub replace: String,
    /// Occurrence limit.
    pub limit: ReplaceLimit,
}

impl PatchStep {
    /// Step replacing only the first occurrence.
    pub fn first(id: impl Into<String>, search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            search: search.into(),
            replace: replace.into(),
            limit: ReplaceLimit::First,
        }
    }

    /// Step replacing every occurrence.
    pub fn all(id: impl Into<String>, search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            search: search.into(),
            replace: replace.into(),
            limit: ReplaceLimit::All,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The step's search literal is absent from the current buffer. The
    /// target has already been patched, was patched differently, or has
    /// drifted from the assumed baseline.
    #[error("step '{id}' (#{index}): search text not found in buffer")]
    PatternNotFound { index: usize, id: String },

    /// An empty search literal matches everywhere and can never express a
    /// guarded intent; rejected before any replacement.
    #[error("step '{id}' (#{index}): search text is empty")]
    EmptySearch { index: usize, id: String },
}

impl PatchError {
    /// Zero-based index of the failing step within its sequence.
    pub fn step_index(&self) -> usize {
        match self {
            PatchError::PatternNotFound { index, .. } | PatchError::EmptySearch { index, .. } => {
                *index
            }
        }
    }
}

/// Per-step outcome from a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub id: String,
    /// Number of occurrences replaced (1 for `First`, >= 1 for `All`).
    pub replaced: usize,
}

/// A fully patched buffer, returned only after every step has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the patched buffer does nothing until the caller persists it"]
pub struct Patched {
    pub text: String,
    pub reports: Vec<StepReport>,
}

/// Apply an ordered sequence of guarded replacements to `buffer`.
///
/// For each step in order: verify the search literal occurs at least once in
/// the current buffer, failing immediately with the step's identity if not,
/// then replace leftmost occurrences up to the step's limit. No further
/// steps run after a failure.
///
/// The input buffer is never mutated; callers decide whether and when to
/// persist the result.
pub fn apply_steps(buffer: &str, steps: &[PatchStep]) -> Result<Patched, PatchError> {
    let mut text = buffer.to_string();
    let mut reports = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        if step.search.is_empty() {
            return Err(PatchError::EmptySearch {
                index,
                id: step.id.clone(),
            });
        }

        let occurrences = text.matches(step.search.as_str()).count();
        if occurrences == 0 {
            return Err(PatchError::PatternNotFound {
                index,
                id: step.id.clone(),
            });
        }

        let replaced = match step.limit {
            ReplaceLimit::First => {
                text = text.replacen(step.search.as_str(), &step.replace, 1);
                1
            }
            ReplaceLimit::All => {
                text = text.replace(step.search.as_str(), &step.replace);
                occurrences
            }
        };

        reports.push(StepReport {
            id: step.id.clone(),
            replaced,
        });
    }

    Ok(Patched { text, reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_replaces_single_occurrence() {
        let result = apply_steps("fn foo_old() {}", &[PatchStep::first("rename", "foo_old", "foo_new")])
            .unwrap();
        assert_eq!(result.text, "fn foo_new() {}");
        assert_eq!(result.text.matches("foo_old").count(), 0);
        assert_eq!(result.reports, vec![StepReport { id: "rename".to_string(), replaced: 1 }]);
    }

    #[test]
    fn test_first_leaves_later_occurrences() {
        let result = apply_steps("x y x y x", &[PatchStep::first("s", "x", "Z")]).unwrap();
        assert_eq!(result.text, "Z y x y x");
        assert_eq!(result.text.matches('x').count(), 2);
    }

    #[test]
    fn test_replacement_lands_at_first_position() {
        let buffer = "aaa NEEDLE bbb NEEDLE ccc";
        let result = apply_steps(buffer, &[PatchStep::first("s", "NEEDLE", "FOUND")]).unwrap();
        assert_eq!(result.text.find("FOUND"), buffer.find("NEEDLE"));
    }

    #[test]
    fn test_all_replaces_every_occurrence() {
        let result = apply_steps("x y x y x", &[PatchStep::all("s", "x", "Z")]).unwrap();
        assert_eq!(result.text, "Z y Z y Z");
        assert_eq!(result.reports[0].replaced, 3);
    }

    #[test]
    fn test_missing_pattern_is_fatal() {
        let err = apply_steps("no match here", &[PatchStep::first("absent", "bar_old", "bar_new")])
            .unwrap_err();
        assert_eq!(
            err,
            PatchError::PatternNotFound {
                index: 0,
                id: "absent".to_string()
            }
        );
    }

    #[test]
    fn test_failure_identifies_failing_step() {
        let steps = vec![
            PatchStep::first("one", "alpha", "ALPHA"),
            PatchStep::first("two", "missing", "MISSING"),
            PatchStep::first("three", "beta", "BETA"),
        ];
        let err = apply_steps("alpha beta", &steps).unwrap_err();
        assert_eq!(err.step_index(), 1);
        assert!(err.to_string().contains("two"));
    }

    #[test]
    fn test_steps_apply_in_order() {
        // The second step matches text produced by the first.
        let steps = vec![
            PatchStep::first("widen", "a", "ab"),
            PatchStep::first("chain", "ab", "abc"),
        ];
        let result = apply_steps("a", &steps).unwrap();
        assert_eq!(result.text, "abc");
    }

    #[test]
    fn test_rerun_fails_on_consumed_pattern() {
        let steps = vec![PatchStep::first("migrate", "foo_old", "foo_new")];
        let once = apply_steps("call foo_old()", &steps).unwrap();
        let err = apply_steps(&once.text, &steps).unwrap_err();
        assert_eq!(err.step_index(), 0);
    }

    #[test]
    fn test_empty_search_rejected() {
        let err = apply_steps("anything", &[PatchStep::first("bad", "", "x")]).unwrap_err();
        assert!(matches!(err, PatchError::EmptySearch { .. }));
    }

    #[test]
    fn test_empty_step_list_is_identity() {
        let result = apply_steps("untouched", &[]).unwrap();
        assert_eq!(result.text, "untouched");
        assert!(result.reports.is_empty());
    }

    /// Buffers with a known occurrence count of a fixed uppercase needle,
    /// built from lowercase filler that cannot collide with it (or with the
    /// uppercase replacement used below).
    fn buffer_with_needles() -> impl Strategy<Value = (usize, String)> {
        (1usize..8).prop_flat_map(|n| {
            prop::collection::vec("[a-z ]{0,6}", n + 1)
                .prop_map(move |fillers| {
                    let mut buf = String::new();
                    for (i, filler) in fillers.iter().enumerate() {
                        buf.push_str(filler);
                        if i < n {
                            buf.push_str("NEEDLE");
                        }
                    }
                    (n, buf)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_first_decrements_occurrence_count((n, buffer) in buffer_with_needles()) {
            let result = apply_steps(&buffer, &[PatchStep::first("s", "NEEDLE", "FOUND")]).unwrap();
            prop_assert_eq!(result.text.matches("NEEDLE").count(), n - 1);
            prop_assert_eq!(result.text.matches("FOUND").count(), 1);
        }

        #[test]
        fn prop_all_leaves_no_occurrences((n, buffer) in buffer_with_needles()) {
            let result = apply_steps(&buffer, &[PatchStep::all("s", "NEEDLE", "FOUND")]).unwrap();
            prop_assert_eq!(result.text.matches("NEEDLE").count(), 0);
            prop_assert_eq!(result.text.matches("FOUND").count(), n);
        }
    }
}
