//! Reconciliation verbs over a remote store
//!
//! Keeps a declared desired state and the remote actual state consistent
//! through four verbs. Per natural key the observable lifecycle is:
//!
//! `Absent -> (create) -> Active -> (update)* -> Active -> (delete) -> Archived -> (create) -> Active`
//!
//! A read that fails with `NotFound` signals drift (the remote record was
//! removed outside this reconciler) and the caller drops local state.

use chrono::Utc;

use crate::error::{ReconcileError, Result};
use crate::record::{Declared, Scope};
use crate::store::RemoteStore;

/// Drives Create/Read/Update/Delete against a [`RemoteStore`].
///
/// Operations are synchronous request/response; concurrent mutation of the
/// same natural key is assumed to be serialized by the caller's orchestration.
/// Network-level resilience belongs to the store, never to this layer.
pub struct Reconciler<S: RemoteStore> {
    store: S,
}

impl<S: RemoteStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new record and return the remote's view of it.
    ///
    /// Issues the store create followed by a mandatory read-back so
    /// server-computed defaults (generated secrets, assigned identity) land in
    /// the returned record. A duplicate active natural key surfaces as
    /// [`ReconcileError::Conflict`] from the remote; an archived generation
    /// under the same key does not block creation.
    ///
    /// If the create succeeds but the read-back fails, the remote record
    /// exists without a locally known identity; the error is surfaced and the
    /// caller recovers with a later [`read`](Self::read).
    pub async fn create(&self, desired: &S::Record) -> Result<S::Record> {
        let key = desired.natural_key().to_string();
        if key.is_empty() {
            return Err(ReconcileError::Validation(
                "natural key must not be empty".to_string(),
            ));
        }
        desired.validate()?;

        let scope = desired.scope();
        tracing::debug!("Creating record '{}' in scope {}", key, scope);

        let created = self.store.create(desired).await?;

        let mut current = self.store.fetch(&scope, &key).await?;
        if current.server_identity().is_none() {
            if let Some(identity) = created.server_identity() {
                current.set_server_identity(identity);
            }
        }

        tracing::debug!(
            "Created record '{}' with server identity {:?}",
            key,
            current.server_identity()
        );
        Ok(current)
    }

    /// Look up current remote state; the result is the source of truth after
    /// every mutation.
    ///
    /// `NotFound` passes through untouched so callers can clear local state
    /// instead of treating drift as fatal.
    pub async fn read(&self, scope: &Scope, natural_key: &str) -> Result<S::Record> {
        tracing::debug!("Reading record '{}' in scope {}", natural_key, scope);
        self.store.fetch(scope, natural_key).await
    }

    /// Overwrite the remote record with the full declared attribute set.
    ///
    /// Every field is sent, defaults included, so an attribute omitted from
    /// the desired state supersedes any remote-only value. Partial patching is
    /// deliberately unsupported: the remote API has no field-level ownership.
    /// A stale identity fails with `NotFound` rather than resurrecting the
    /// wrong record.
    pub async fn update(&self, desired: &S::Record) -> Result<S::Record> {
        let identity = desired.server_identity().ok_or_else(|| {
            ReconcileError::Validation(
                "server identity is required for update; create or read the record first"
                    .to_string(),
            )
        })?;
        desired.validate()?;

        tracing::debug!(
            "Updating record '{}' (identity {}) in scope {}",
            desired.natural_key(),
            identity,
            desired.scope()
        );
        self.store.update(desired).await
    }

    /// Archive the record: stamp `archived_at` and overwrite through
    /// [`update`](Self::update).
    ///
    /// The remote row is never physically removed; archived generations stay
    /// queryable and the natural key may be re-registered by a later create.
    /// The inner update error propagates, so callers clear their local
    /// natural key only on success.
    pub async fn delete(&self, desired: &S::Record) -> Result<()> {
        let mut archived = desired.clone();
        if archived.archived_at().is_none() {
            archived.set_archived_at(Some(Utc::now()));
        }

        tracing::debug!(
            "Archiving record '{}' in scope {}",
            archived.natural_key(),
            archived.scope()
        );
        self.update(&archived).await.map(|_| ())
    }
}
