//! Remote store bindings for the reconciliation framework

pub mod clients;
pub mod servers;

pub use clients::OpenIdClientStore;
pub use servers::OpenIdServerStore;
