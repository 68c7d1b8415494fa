//! Smile CDR admin API client

pub mod client;
pub mod common;
pub mod error;
pub mod openid;

pub use client::{Client, RetryConfig};
pub use common::{AdminResource, ApiErrorDetails, ApiErrorResponse};
pub use error::ApiError;
pub use openid::{ClientSecret, GrantType, OpenIdClient, OpenIdServer, UserPermission};
