use std::path::{Path, PathBuf};

/// Name of the installed skill; the destination is always
/// `<target>/<SKILL_NAME>/SKILL.md`.
pub const SKILL_NAME: &str = "ember-publish";

/// A tool configuration directory the skill file can be installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Skills directory, relative to the project root.
    pub dir: &'static str,
    pub label: &'static str,
}

/// Project-scoped targets, in priority order. The first entry doubles as the
/// fallback when detection finds nothing.
pub const PROJECT_TARGETS: &[Target] = &[
    Target {
        dir: ".claude/skills",
        label: "Claude Code (project)",
    },
    Target {
        dir: ".cursor/skills",
        label: "Cursor (project)",
    },
];

/// User-scoped targets for `--global` installs.
pub fn global_targets() -> anyhow::Result<Vec<(PathBuf, &'static str)>> {
    let dirs = directories::UserDirs::new()
        .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;
    Ok(vec![(
        dirs.home_dir().join(".claude").join("skills"),
        "Claude Code (global)",
    )])
}

/// Pick the project targets to install into.
///
/// A target qualifies when its skills directory already exists or its parent
/// tool directory does (e.g. `.claude/`). When nothing qualifies, fall back
/// to the first target so a bare project still gets an install.
pub fn detect_targets(root: &Path) -> Vec<&'static Target> {
    let mut detected: Vec<&'static Target> = PROJECT_TARGETS
        .iter()
        .filter(|target| {
            let dest = root.join(target.dir);
            dest.exists() || dest.parent().is_some_and(Path::exists)
        })
        .collect();

    if detected.is_empty() {
        detected.push(&PROJECT_TARGETS[0]);
    }
    detected
}
