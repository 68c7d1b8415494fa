//! Remote store collaborator seam

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Declared, Scope};

/// Remote store verbs consumed by the reconciler.
///
/// Transport, authentication, serialization and retry policy are entirely the
/// implementor's concern; the reconciler only sees the typed record and the
/// error taxonomy. There is no physical delete verb: the remote model archives
/// records through `update` instead of removing them.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    type Record: Declared + Clone + Send + Sync;

    /// Register a new record and return it with the server-assigned identity.
    async fn create(&self, record: &Self::Record) -> Result<Self::Record>;

    /// Look up current remote state by natural key within a scope.
    ///
    /// Must fail with [`ReconcileError::NotFound`](crate::ReconcileError) when
    /// no record matches.
    async fn fetch(&self, scope: &Scope, natural_key: &str) -> Result<Self::Record>;

    /// Overwrite the remote record identified by the record's server identity
    /// with the full attribute set, returning the stored result.
    async fn update(&self, record: &Self::Record) -> Result<Self::Record>;
}
