use std::io::Write;

use {
    anyhow::Result,
    emberflow_oauth::{PollOutcome, TokenStore, device_flow},
};

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// How the run decides whether to start the sign-in flow.
#[derive(Debug, Clone, Copy)]
pub enum AuthMode {
    /// Ask interactively; anything but an explicit "n"/"no" proceeds.
    PromptDefaultYes,
    /// `--auth`: sign in unconditionally, even when a token exists.
    ForceYes,
    /// `--skip-auth`: never sign in.
    ForceSkip,
}

impl AuthMode {
    pub fn from_flags(auth: bool, skip_auth: bool) -> Self {
        if auth {
            Self::ForceYes
        } else if skip_auth {
            Self::ForceSkip
        } else {
            Self::PromptDefaultYes
        }
    }
}

pub async fn run(mode: AuthMode) -> Result<()> {
    run_with(mode, &TokenStore::new(), device_flow::DEFAULT_BASE_URL).await
}

async fn run_with(mode: AuthMode, store: &TokenStore, base_url: &str) -> Result<()> {
    match mode {
        AuthMode::ForceSkip => return Ok(()),
        AuthMode::ForceYes => {},
        AuthMode::PromptDefaultYes => {
            if store.load().is_some() {
                tracing::debug!("existing session token found, skipping sign-in");
                return Ok(());
            }
            if !prompt_sign_in()? {
                return Ok(());
            }
        },
    }

    sign_in(store, base_url).await
}

/// Every network failure in here is a soft failure: print a retry hint and
/// return cleanly. Only the token write may abort the process.
async fn sign_in(store: &TokenStore, base_url: &str) -> Result<()> {
    let client = reqwest::Client::new();

    let session = match device_flow::request_device_code(&client, base_url).await {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(error = %e, "device-code request failed");
            println!("  Could not reach Emberflow. Sign in later with: emberflow-skills --auth");
            return Ok(());
        },
    };

    println!();
    println!("  To sign in, visit {CYAN}{}{RESET}", session.verification_url);
    println!("  and enter the code: {BOLD}{}{RESET}", session.code);
    println!();

    // Fire and forget; the user can always open the URL by hand.
    let _ = open::that(&session.verification_url);

    let outcome = device_flow::poll_for_session(
        &client,
        base_url,
        &session.code,
        device_flow::POLL_INTERVAL,
        device_flow::MAX_POLL_ATTEMPTS,
        spinner_tick,
    )
    .await;

    finish(store, outcome)
}

fn finish(store: &TokenStore, outcome: PollOutcome) -> Result<()> {
    clear_progress_line();
    match outcome {
        PollOutcome::Approved(token) => {
            store.save(&token)?;
            println!(
                "  {GREEN}\u{2713}{RESET} Signed in. Token saved to {}",
                store.path().display()
            );
        },
        PollOutcome::Expired => {
            println!("  Sign-in code expired. Run emberflow-skills --auth to request a new one.");
        },
        PollOutcome::TimedOut => {
            println!("  Timed out waiting for approval. Run emberflow-skills --auth to try again.");
        },
    }
    Ok(())
}

fn prompt_sign_in() -> Result<bool> {
    print!("  Sign in to Emberflow to publish under your account? [Y/n] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(answer_is_yes(&line))
}

/// Default-yes: only an explicit "n"/"no" declines.
fn answer_is_yes(line: &str) -> bool {
    !matches!(line.trim().to_ascii_lowercase().as_str(), "n" | "no")
}

fn spinner_tick(attempt: u32) {
    const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
    let frame = FRAMES[attempt as usize % FRAMES.len()];
    print!("\r  {frame} Waiting for approval...");
    let _ = std::io::stdout().flush();
}

fn clear_progress_line() {
    print!("\r\x1b[2K");
    let _ = std::io::stdout().flush();
}
