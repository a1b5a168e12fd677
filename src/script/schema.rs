use crate::patch::{PatchStep, ReplaceLimit};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A declarative patch script: one target file, an ordered list of guarded
/// replacement steps.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PatchScript {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Target file. Relative paths resolve against the project root.
    #[serde(default)]
    pub file: String,
    /// Optional xxh3-64 fingerprint (hex) of the normalized baseline content.
    /// When present, a target that has drifted from the snapshot the steps
    /// were authored against fails before step 1 runs.
    #[serde(default)]
    pub baseline_hash: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StepDefinition {
    pub id: String,
    pub search: String,
    pub replace: String,
    #[serde(default)]
    pub limit: LimitSpec,
}

/// Occurrence limit as written in script TOML.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LimitSpec {
    #[default]
    First,
    All,
}

impl From<LimitSpec> for ReplaceLimit {
    fn from(spec: LimitSpec) -> Self {
        match spec {
            LimitSpec::First => ReplaceLimit::First,
            LimitSpec::All => ReplaceLimit::All,
        }
    }
}

impl StepDefinition {
    /// Lower the definition to an engine step.
    pub fn to_step(&self) -> PatchStep {
        PatchStep {
            id: self.id.clone(),
            search: self.search.clone(),
            replace: self.replace.clone(),
            limit: self.limit.into(),
        }
    }
}

/// Why a script's TOML text could not become a usable [`PatchScript`].
#[derive(Error, Debug)]
pub enum ScriptParseError {
    #[error(transparent)]
    Toml(#[from] toml_edit::de::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Failure while loading a script file. Both variants name the file, since
/// `apply` batches over a whole `patches/` directory and the user needs to
/// know which script to fix.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("cannot read patch script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("patch script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ScriptParseError,
    },
}

impl PatchScript {
    /// Parse and validate a script from its TOML text.
    pub fn from_toml(input: &str) -> Result<Self, ScriptParseError> {
        let script: PatchScript = toml_edit::de::from_str(input)?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script file, attaching the path to any failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.meta.file.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                step_id: None,
                field: "meta.file",
            });
        }

        if self.steps.is_empty() {
            issues.push(ValidationIssue::EmptyStepList);
        }

        if let Some(hash) = &self.meta.baseline_hash {
            if parse_baseline_hash(hash).is_none() {
                issues.push(ValidationIssue::InvalidValue {
                    step_id: None,
                    message: format!("baseline_hash '{hash}' is not a 64-bit hex value"),
                });
            }
        }

        for step in &self.steps {
            if step.id.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    step_id: None,
                    field: "id",
                });
            }
            if step.search.is_empty() {
                issues.push(ValidationIssue::MissingField {
                    step_id: Some(step.id.clone()),
                    field: "search",
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Lower all step definitions to engine steps, in script order.
    pub fn to_steps(&self) -> Vec<PatchStep> {
        self.steps.iter().map(StepDefinition::to_step).collect()
    }
}

/// Parse a `baseline_hash` value ("0a1b..." or "0x0a1b...") into the raw
/// xxh3-64 value.
pub fn parse_baseline_hash(value: &str) -> Option<u64> {
    u64::from_str_radix(value.trim().trim_start_matches("0x"), 16).ok()
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyStepList,
    MissingField {
        step_id: Option<String>,
        field: &'static str,
    },
    InvalidValue {
        step_id: Option<String>,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyStepList => write!(f, "patch script contains no steps"),
            ValidationIssue::MissingField { step_id, field } => match step_id {
                Some(id) => write!(f, "step '{id}' missing required field '{field}'"),
                None => write!(f, "script missing required field '{field}'"),
            },
            ValidationIssue::InvalidValue { step_id, message } => match step_id {
                Some(id) => write!(f, "step '{id}' has invalid configuration: {message}"),
                None => write!(f, "invalid script configuration: {message}"),
            },
        }
    }
}
