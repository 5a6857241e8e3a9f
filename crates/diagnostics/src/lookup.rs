use tracing::debug;

use crate::diagnostic::{codes, Diagnostic};

/// First diagnostic flagging an invalid file metadata reference, if any.
///
/// Pure filter: absence of a match is a normal outcome, never an error.
pub fn find_invalid_file_metadata_reference(diagnostics: &[Diagnostic]) -> Option<&Diagnostic> {
    let found = diagnostics
        .iter()
        .find(|d| d.code == codes::INVALID_FILE_METADATA_REFERENCE);
    debug!(
        total = diagnostics.len(),
        matched = found.is_some(),
        "filtered diagnostics for invalid file metadata reference"
    );
    found
}
