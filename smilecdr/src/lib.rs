//! smilecdr - Smile CDR admin API client and OpenID resource reconciliation
//!
//! Binds the OpenID Connect client and identity provider object families of a
//! Smile CDR smart auth module to the `reconcile` framework: typed records,
//! REST endpoints scoped by node/module, store implementations for the
//! reconciler's verbs, and host-state attribute adapters.

pub mod api;
pub mod config;
pub mod state;
pub mod stores;

pub use api::{Client, RetryConfig};
pub use config::Config;
pub use stores::{OpenIdClientStore, OpenIdServerStore};
