//! Workflow orchestration, kept apart from CLI argument parsing

pub mod orchestration;

pub use orchestration::{
    check_change, check_downgrade, compute_version, effective_enforcement, enforcement_rules,
    override_version, refresh_tags, ComputedVersion,
};
