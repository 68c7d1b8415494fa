//! Common types and path helpers for the admin API

use reconcile::Scope;
use serde::Deserialize;

/// Error body shape returned by the admin API.
///
/// Responses vary between a single `message` string and a `messages` list
/// depending on the endpoint; both are kept.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: Option<String>,
    pub messages: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
#[error("admin API error details: message={message:?}, messages={messages:?}")]
pub struct ApiErrorDetails {
    pub message: Option<String>,
    pub messages: Option<Vec<String>>,
}

/// Admin API object family addressed by node/module scope.
///
/// Collection URLs look like `/{collection}/{nodeId}/{moduleId}` and item
/// URLs append one percent-encoded key segment.
pub trait AdminResource {
    fn collection() -> &'static str;

    fn collection_path(scope: &Scope) -> String {
        format!(
            "/{}/{}/{}",
            Self::collection(),
            urlencoding::encode(&scope.node),
            urlencoding::encode(&scope.module)
        )
    }

    fn item_path(scope: &Scope, key: &str) -> String {
        format!(
            "{}/{}",
            Self::collection_path(scope),
            urlencoding::encode(key)
        )
    }
}
