use std::collections::HashSet;

use super::event::SenderId;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// The set of sender identifiers permitted to use the bot.
///
/// An empty set allows everyone. Built once from configuration and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    allowed: HashSet<SenderId>,
}

impl AuthorizationPolicy {
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = SenderId>) -> Self {
        Self {
            allowed: ids.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list of numeric sender ids.
    ///
    /// Empty entries are skipped; any non-numeric entry is an error.
    pub fn parse(list: &str) -> Result<Self, anyhow::Error> {
        let mut allowed = HashSet::new();
        for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = entry
                .parse::<SenderId>()
                .map_err(|_| anyhow::anyhow!("Invalid user id in AUTHORIZED_USERS: {}", entry))?;
            allowed.insert(id);
        }
        Ok(Self { allowed })
    }

    pub fn check(&self, sender: SenderId) -> Authorization {
        if self.allowed.is_empty() || self.allowed.contains(&sender) {
            Authorization::Allowed
        } else {
            Authorization::Denied
        }
    }

    pub fn allows_everyone(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
