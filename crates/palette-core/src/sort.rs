//! Per-section ordering rules.
//!
//! - Prompts: entries needing follow-up input first, then entries that are
//!   not auto-submitted, then by display name.
//! - Commands: by display name.
//!
//! Names are unique within a section, so both orders are total.

use std::cmp::Ordering;

use crate::items::{CommandEntry, PromptEntry};

/// Ordering of two prompt entries.
pub fn compare_prompts(a: &PromptEntry, b: &PromptEntry) -> Ordering {
    b.requires_followup_input
        .cmp(&a.requires_followup_input)
        .then_with(|| a.auto_submit.cmp(&b.auto_submit))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort prompt entries in place.
pub fn sort_prompts(prompts: &mut [PromptEntry]) {
    prompts.sort_by(compare_prompts);
}

/// Sort command entries in place by name.
pub fn sort_commands(commands: &mut [CommandEntry]) {
    commands.sort_by(|a, b| a.name.cmp(&b.name));
}
