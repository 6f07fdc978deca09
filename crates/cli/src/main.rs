mod auth;

use {
    clap::Parser,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::auth::AuthMode;

#[derive(Parser)]
#[command(
    name = "emberflow-skills",
    about = "Install the ember-publish skill and sign in to Emberflow"
)]
struct Cli {
    /// Install into the user-scoped (global) targets instead of
    /// auto-detected project targets.
    #[arg(short, long)]
    global: bool,

    /// Skip installation and run the sign-in flow unconditionally.
    #[arg(long)]
    auth: bool,

    /// Never prompt for sign-in.
    #[arg(long, conflicts_with = "auth")]
    skip_auth: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_telemetry(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true),
        )
        .init();
}

/// Install step of the run sequence. `--auth` is sign-in only, so it
/// installs nothing. Returns the number of targets installed into.
fn install_step(root: &std::path::Path, global: bool, auth_only: bool) -> anyhow::Result<usize> {
    if auth_only {
        return Ok(0);
    }
    emberflow_install::run_install(root, global)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli.log_level);

    let mode = AuthMode::from_flags(cli.auth, cli.skip_auth);

    let root = std::env::current_dir()?;
    install_step(&root, cli.global, cli.auth)?;

    auth::run(mode).await
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_invocation_installs_and_prompts() {
        let cli = Cli::try_parse_from(["emberflow-skills"]).unwrap();
        assert!(!cli.global);
        assert!(!cli.auth);
        assert!(matches!(
            AuthMode::from_flags(cli.auth, cli.skip_auth),
            AuthMode::PromptDefaultYes
        ));
    }

    #[test]
    fn auth_flag_is_sign_in_only() {
        let cli = Cli::try_parse_from(["emberflow-skills", "--auth"]).unwrap();
        assert!(cli.auth, "install step must be skipped");
        assert!(matches!(
            AuthMode::from_flags(cli.auth, cli.skip_auth),
            AuthMode::ForceYes
        ));
    }

    #[test]
    fn sign_in_only_run_writes_no_skill_paths() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".claude")).unwrap();
        std::fs::create_dir(tmp.path().join(".cursor")).unwrap();

        let installed = install_step(tmp.path(), false, true).unwrap();
        assert_eq!(installed, 0);
        assert!(!tmp.path().join(".claude/skills").exists());
        assert!(!tmp.path().join(".cursor/skills").exists());
    }

    #[test]
    fn default_run_installs_before_sign_in() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".claude")).unwrap();

        let installed = install_step(tmp.path(), false, false).unwrap();
        assert_eq!(installed, 1);
        assert!(
            tmp.path()
                .join(".claude/skills/ember-publish/SKILL.md")
                .is_file()
        );
    }

    #[test]
    fn global_short_flag() {
        let cli = Cli::try_parse_from(["emberflow-skills", "-g"]).unwrap();
        assert!(cli.global);
    }

    #[test]
    fn skip_auth_conflicts_with_auth() {
        assert!(Cli::try_parse_from(["emberflow-skills", "--auth", "--skip-auth"]).is_err());

        let cli = Cli::try_parse_from(["emberflow-skills", "--skip-auth"]).unwrap();
        assert!(matches!(
            AuthMode::from_flags(cli.auth, cli.skip_auth),
            AuthMode::ForceSkip
        ));
    }
}
