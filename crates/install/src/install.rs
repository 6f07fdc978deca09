use std::path::{Path, PathBuf};

use crate::targets::{SKILL_NAME, detect_targets, global_targets};

/// File name written into each skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// The skill definition shipped with this binary.
const SKILL_MD: &str = include_str!("../skill/SKILL.md");

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Write the bundled skill file into `<dest_dir>/ember-publish/SKILL.md`,
/// creating missing directories and overwriting any existing copy.
///
/// Filesystem errors propagate; for a one-shot installer they abort the run.
pub fn install_skill(dest_dir: &Path, label: &str) -> anyhow::Result<PathBuf> {
    let skill_dir = dest_dir.join(SKILL_NAME);
    std::fs::create_dir_all(&skill_dir)?;
    std::fs::write(skill_dir.join(SKILL_FILE), SKILL_MD)?;
    tracing::debug!(path = %skill_dir.display(), label, "installed skill file");
    Ok(skill_dir)
}

/// Run the install sequence: banner, target selection, one install per
/// target, usage hint. Returns the number of targets installed into.
pub fn run_install(root: &Path, global: bool) -> anyhow::Result<usize> {
    println!();
    println!("  {BOLD}Emberflow Skills Installer{RESET}");
    println!();

    let mut installed = 0;

    if global {
        for (dir, label) in global_targets()? {
            let skill_dir = install_skill(&dir, label)?;
            report_installed(&skill_dir, label, root);
            installed += 1;
        }
    } else {
        for target in detect_targets(root) {
            let skill_dir = install_skill(&root.join(target.dir), target.label)?;
            report_installed(&skill_dir, target.label, root);
            installed += 1;
        }
    }

    if installed > 0 {
        println!();
        println!("  Use: {CYAN}/{SKILL_NAME}{RESET} {DIM}[topic]{RESET}");
        println!();
    }

    Ok(installed)
}

fn report_installed(skill_dir: &Path, label: &str, root: &Path) {
    // Global installs are outside the project root; show them absolute.
    let shown = skill_dir.strip_prefix(root).unwrap_or(skill_dir);
    println!(
        "  {GREEN}\u{2713}{RESET} Installed to {} {DIM}({label}){RESET}",
        shown.display()
    );
}
