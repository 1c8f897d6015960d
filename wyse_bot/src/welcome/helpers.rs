use teloxide::utils::html::escape;
use wyse_core::report::HOUSE_RULES;

use crate::welcome::dto::MemberStatus;

/// A join is a transition from outside the chat to a regular or privileged member.
pub fn is_join_event(old: MemberStatus, new: MemberStatus) -> bool {
    matches!(old, MemberStatus::Left | MemberStatus::Kicked)
        && matches!(
            new,
            MemberStatus::Member | MemberStatus::Administrator | MemberStatus::Creator
        )
}

pub fn welcome_text(first_name: &str) -> String {
    let name = if first_name.trim().is_empty() {
        "Trader"
    } else {
        first_name
    };
    format!("👋 Welcome, <b>{}</b>!\n\n{}", escape(name), HOUSE_RULES)
}
