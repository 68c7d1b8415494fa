//! reconcile - Declarative resource reconciliation
//!
//! Keeps a locally declared desired configuration and the actual state held
//! by a remote store consistent through Create/Read/Update/Delete verbs.
//! Records are addressed by a caller-chosen natural key within a node/module
//! scope; the remote assigns an opaque numeric identity on creation, and
//! deletion is a soft archive rather than a physical removal.

// Core modules
pub mod error;
pub mod record;
pub mod reconciler;
pub mod store;

// Host adapter modules
pub mod value;

// Re-exports for convenience
pub use error::{BoxError, ReconcileError, Result};
pub use reconciler::Reconciler;
pub use record::{Declared, Scope};
pub use store::RemoteStore;
pub use value::{AttributeMapped, Attributes, Value};
