use serde::{Deserialize, Serialize};

/// Response from the device-code request. Lives only for the duration of one
/// sign-in attempt and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCodeSession {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub verification_url: String,
}

/// Per-poll status reported by the remote endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Pending,
    Approved,
    Expired,
    /// Any status string this client does not know. Treated like `pending`
    /// so a newer server cannot wedge the loop.
    #[default]
    #[serde(other)]
    Unknown,
}

/// One poll response. `session_token` is only meaningful on `approved`.
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub status: PollStatus,
    #[serde(default)]
    pub session_token: Option<String>,
}

/// The persisted session token, sole content of `~/.emberflow/token.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
}
