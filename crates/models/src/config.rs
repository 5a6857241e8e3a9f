use serde::{Deserialize, Serialize};

/// Binder limits supplied by host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinderConfig {
    /// Largest request body the binder will read.
    pub max_body_bytes: usize,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024, // 1 MiB
        }
    }
}
