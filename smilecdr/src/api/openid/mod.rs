//! OpenID Connect object families managed by the smart auth module

pub mod clients;
pub mod servers;

pub use clients::{ClientSecret, GrantType, OpenIdClient, UserPermission};
pub use servers::OpenIdServer;
