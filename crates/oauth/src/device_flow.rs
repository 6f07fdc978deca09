use std::time::Duration;

use tracing::debug;

use crate::{
    Error, Result,
    types::{DeviceCodeSession, PollResponse, PollStatus, SessionToken},
};

/// Base URL of the Emberflow service.
pub const DEFAULT_BASE_URL: &str = "https://emberflow.dev";

/// Delay between two consecutive approval polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Attempt budget: 60 polls at 3 seconds bounds the wait to three minutes.
pub const MAX_POLL_ATTEMPTS: u32 = 60;

/// Terminal result of the approval poll loop.
///
/// Only `Approved` carries anything worth persisting; the other outcomes
/// leave the machine exactly as it was before the flow started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Approved(SessionToken),
    Expired,
    TimedOut,
}

/// Request a fresh device code from the service.
///
/// A transport failure or a response without a code is an error; the caller
/// reports it as a soft "try again later" and persists nothing.
pub async fn request_device_code(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<DeviceCodeSession> {
    let resp = client
        .post(format!("{base_url}/api/device-code"))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(Error::protocol(format!(
            "device-code request failed: HTTP {}",
            resp.status()
        )));
    }

    let session: DeviceCodeSession = resp.json().await?;
    if session.code.is_empty() {
        return Err(Error::protocol("device-code response missing code"));
    }
    Ok(session)
}

/// One status poll for the given device code.
async fn poll_once(client: &reqwest::Client, base_url: &str, code: &str) -> Result<PollResponse> {
    let resp = client
        .get(format!("{base_url}/api/device-code/{code}"))
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?;
    Ok(resp.json().await?)
}

/// Poll the service until the user approves the code, the code expires, or
/// the attempt budget runs out.
///
/// Transient transport errors are swallowed and the loop keeps going; an
/// `expired` status stops it immediately. `on_waiting` is invoked once per
/// non-terminal attempt so the caller can animate a progress line.
pub async fn poll_for_session(
    client: &reqwest::Client,
    base_url: &str,
    code: &str,
    interval: Duration,
    max_attempts: u32,
    mut on_waiting: impl FnMut(u32),
) -> PollOutcome {
    for attempt in 0..max_attempts {
        if attempt > 0 {
            tokio::time::sleep(interval).await;
        }

        let resp = match poll_once(client, base_url, code).await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(attempt, error = %e, "poll failed, will retry");
                on_waiting(attempt);
                continue;
            },
        };

        match resp.status {
            PollStatus::Approved => match resp.session_token.filter(|t| !t.is_empty()) {
                Some(token) => return PollOutcome::Approved(SessionToken { token }),
                None => {
                    debug!(attempt, "approved response without session token, still waiting");
                    on_waiting(attempt);
                },
            },
            PollStatus::Expired => return PollOutcome::Expired,
            PollStatus::Pending | PollStatus::Unknown => on_waiting(attempt),
        }
    }

    PollOutcome::TimedOut
}
