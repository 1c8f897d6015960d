use teloxide::types::ChatMemberKind;

/// Membership status as far as join detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl From<&ChatMemberKind> for MemberStatus {
    fn from(kind: &ChatMemberKind) -> Self {
        if kind.is_owner() {
            MemberStatus::Creator
        } else if kind.is_administrator() {
            MemberStatus::Administrator
        } else if kind.is_left() {
            MemberStatus::Left
        } else if kind.is_banned() {
            MemberStatus::Kicked
        } else if kind.is_restricted() {
            MemberStatus::Restricted
        } else {
            MemberStatus::Member
        }
    }
}
