//! Authorization gate
//!
//! The owner (the account the session belongs to) is always permitted, in
//! every chat. Everyone else is checked against the allow-lists: private
//! chats require the user to be allow-listed; group chats require the
//! group to be allow-listed AND, when a user allow-list is configured, the
//! user to be on it. An empty user allow-list in an authorized group means
//! nobody but the owner may use the bot there.

use crate::core::config;

/// Decides whether an (identity, chat) pair may invoke the bot.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    owner_id: i64,
    users: Vec<i64>,
    groups: Vec<i64>,
}

impl AuthPolicy {
    pub fn new(owner_id: i64, users: Vec<i64>, groups: Vec<i64>) -> Self {
        Self {
            owner_id,
            users,
            groups,
        }
    }

    /// Build the policy from the environment allow-lists.
    pub fn from_config(owner_id: i64) -> Self {
        Self::new(
            owner_id,
            config::AUTHORIZED_USERS.clone(),
            config::AUTHORIZED_GROUPS.clone(),
        )
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    /// Whether `user_id` may invoke the bot in `chat_id`.
    pub fn permits(&self, user_id: i64, chat_id: i64, is_private: bool) -> bool {
        if user_id == self.owner_id {
            return true;
        }
        if is_private {
            return self.users.contains(&user_id);
        }
        if !self.groups.contains(&chat_id) {
            return false;
        }
        // In groups an empty user allow-list does not open the gate: only
        // the owner may use the bot there.
        if self.users.is_empty() {
            return false;
        }
        self.users.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: i64 = 1000;

    #[test]
    fn owner_is_permitted_everywhere() {
        let policy = AuthPolicy::new(OWNER, vec![], vec![]);
        assert!(policy.permits(OWNER, 555, true));
        assert!(policy.permits(OWNER, -100123, false));
    }

    #[test]
    fn private_chat_requires_user_allow_list() {
        let policy = AuthPolicy::new(OWNER, vec![2000], vec![]);
        assert!(policy.permits(2000, 2000, true));
        assert!(!policy.permits(3000, 3000, true));
    }

    #[test]
    fn empty_user_list_denies_private_non_owner() {
        let policy = AuthPolicy::new(OWNER, vec![], vec![]);
        assert!(!policy.permits(2000, 2000, true));
    }

    #[test]
    fn group_requires_group_allow_list() {
        let policy = AuthPolicy::new(OWNER, vec![2000], vec![-100123]);
        assert!(policy.permits(2000, -100123, false));
        assert!(!policy.permits(2000, -100999, false));
    }

    #[test]
    fn authorized_group_with_empty_user_list_is_owner_only() {
        let policy = AuthPolicy::new(OWNER, vec![], vec![-100123]);
        assert!(policy.permits(OWNER, -100123, false));
        assert!(!policy.permits(2000, -100123, false));
    }

    #[test]
    fn allow_listed_user_not_in_group_list_is_denied_in_groups() {
        // A user allowed in private chats still needs the group itself to
        // be allow-listed.
        let policy = AuthPolicy::new(OWNER, vec![2000], vec![]);
        assert!(!policy.permits(2000, -100123, false));
    }
}
