mod config_dir;
pub mod device_flow;
pub mod error;
pub mod storage;
pub mod types;

pub use {
    device_flow::{DEFAULT_BASE_URL, MAX_POLL_ATTEMPTS, POLL_INTERVAL, PollOutcome},
    storage::TokenStore,
    types::{DeviceCodeSession, PollStatus, SessionToken},
};

pub use error::{Error, Result};
