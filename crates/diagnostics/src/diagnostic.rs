use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable codes attached to script compilation diagnostics.
pub mod codes {
    /// The function script compiled without a usable entry point.
    pub const MISSING_ENTRY_POINT: &str = "AF001";
    /// More than one candidate entry point was found.
    pub const AMBIGUOUS_ENTRY_POINTS: &str = "AF002";
    /// The entry point takes no trigger parameter.
    pub const MISSING_TRIGGER_ARGUMENT: &str = "AF003";
    /// A file metadata reference names an assembly path that cannot be loaded.
    pub const INVALID_FILE_METADATA_REFERENCE: &str = "AF004";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Info" => Ok(Severity::Info),
            "Warning" => Ok(Severity::Warning),
            "Error" => Ok(Severity::Error),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// One record produced by the compilation step. Read-only after compilation;
/// this crate only filters them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: &str, severity: Severity, message: &str) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.to_string(),
        }
    }

    /// The diagnostic emitted when a "file" (non-framework) metadata reference
    /// cannot be resolved, with its fixed remediation message.
    pub fn invalid_file_reference(reference: &str) -> Self {
        Self {
            code: codes::INVALID_FILE_METADATA_REFERENCE.to_string(),
            severity: Severity::Error,
            message: format!(
                "The reference '{}' is invalid. If you are attempting to add a framework reference, please remove the '.dll' file extension.",
                reference
            ),
        }
    }
}

/// The output of compiling one script unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompiledScript {
    pub script_name: String,
    pub compiled_at: DateTime<Utc>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledScript {
    pub fn new(script_name: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            script_name: script_name.to_string(),
            compiled_at: Utc::now(),
            diagnostics,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}
