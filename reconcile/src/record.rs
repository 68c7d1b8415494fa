//! Declared record contract and scope selector

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Two-level partition key for remote lookups.
///
/// The remote service partitions objects by deployment node and module
/// instance; identically-named objects may exist in different partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub node: String,
    pub module: String,
}

impl Scope {
    pub fn new(node: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            module: module.into(),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.node, self.module)
    }
}

/// Desired-state record managed by a [`Reconciler`](crate::Reconciler).
///
/// The natural key is caller-chosen and stable for the record's lifetime; the
/// server identity is assigned by the remote service on first creation and
/// must accompany every later update so the remote side can disambiguate
/// among archived generations of the same key.
pub trait Declared {
    /// Caller-chosen stable identifier, unique within the record's scope.
    fn natural_key(&self) -> &str;

    /// Partition the record lives in.
    fn scope(&self) -> Scope;

    /// Remote-assigned numeric identity; `None` before first creation.
    fn server_identity(&self) -> Option<i64>;

    fn set_server_identity(&mut self, identity: i64);

    /// Soft-delete marker; a set timestamp means the record is logically
    /// deleted even though the remote row still exists.
    fn archived_at(&self) -> Option<DateTime<Utc>>;

    fn set_archived_at(&mut self, at: Option<DateTime<Utc>>);

    fn is_archived(&self) -> bool {
        self.archived_at().is_some()
    }

    /// Domain-specific attribute validation, run before create and update.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_displays_as_node_slash_module() {
        let scope = Scope::new("Master", "smart_auth");
        assert_eq!(scope.to_string(), "Master/smart_auth");
    }
}
