pub mod runner;
pub mod schema;

pub use runner::{check_script, run_script, RunError, ScriptOutcome};
pub use schema::{
    parse_baseline_hash, LimitSpec, Metadata, PatchScript, ScriptError, ScriptParseError,
    StepDefinition, ValidationError, ValidationIssue,
};
