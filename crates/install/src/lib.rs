pub mod install;
pub mod targets;

pub use {
    install::{SKILL_FILE, install_skill, run_install},
    targets::{PROJECT_TARGETS, SKILL_NAME, Target, detect_targets, global_targets},
};
