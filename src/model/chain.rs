use serde::{Deserialize, Serialize};

/// The EVM chain the farm lives on.
///
/// In JSON: `{"name": "Aurora", "rpc_url": "https://mainnet.aurora.dev"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Chain {
    /// Display name, only used in logs.
    pub name: String,
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Chain {
    pub fn aurora() -> Self {
        Chain {
            name: "Aurora".into(),
            rpc_url: "https://mainnet.aurora.dev".into(),
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::aurora()
    }
}

// ── Display ──────────────────────────────────────────────────────────

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
