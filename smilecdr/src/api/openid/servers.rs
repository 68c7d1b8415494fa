//! OpenID Connect identity provider (server) definitions and endpoints

use chrono::{DateTime, Utc};
use reconcile::Scope;
use serde::{Deserialize, Serialize};

use super::super::common::AdminResource;
use super::super::error::ApiError;
use super::clients::{DEFAULT_MODULE_ID, DEFAULT_NODE_ID};

/// Upstream OpenID Connect identity provider trusted by the smart auth
/// module for federated sign-in and token validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenIdServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    pub name: String,
    pub issuer: String,
    pub node_id: String,
    pub module_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_introspection_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_introspection_client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_jwk_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_jwk_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_registration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_request_scopes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_authorization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_token_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_user_info_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_jwk_set_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_well_known_config_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl Default for OpenIdServer {
    fn default() -> Self {
        Self {
            pid: None,
            name: String::new(),
            issuer: String::new(),
            node_id: DEFAULT_NODE_ID.to_string(),
            module_id: DEFAULT_MODULE_ID.to_string(),
            token_introspection_client_id: None,
            token_introspection_client_secret: None,
            validation_jwk_text: None,
            validation_jwk_file: None,
            federation_registration_id: None,
            federation_request_scopes: None,
            federation_authorization_url: None,
            federation_token_url: None,
            federation_user_info_url: None,
            federation_jwk_set_url: None,
            auth_well_known_config_url: None,
            fhir_endpoint_url: None,
            response_type: None,
            audience: None,
            notes: None,
            archived_at: None,
        }
    }
}

impl OpenIdServer {
    pub fn scope(&self) -> Scope {
        Scope::new(&self.node_id, &self.module_id)
    }
}

impl AdminResource for OpenIdServer {
    fn collection() -> &'static str {
        "openid-connect-servers"
    }
}

impl super::super::Client {
    /// List all identity providers in a module scope
    pub async fn list_openid_servers(
        &self,
        scope: &Scope,
    ) -> Result<Vec<OpenIdServer>, ApiError> {
        self.get(&OpenIdServer::collection_path(scope)).await
    }

    /// Register a new identity provider; the response carries the assigned pid
    pub async fn create_openid_server(
        &self,
        server: &OpenIdServer,
    ) -> Result<OpenIdServer, ApiError> {
        self.post(&OpenIdServer::collection_path(&server.scope()), server)
            .await
    }

    /// Overwrite an existing identity provider, addressed by pid
    ///
    /// Unlike clients, identity providers have no key-addressed item endpoint;
    /// the pid is the only stable handle for writes.
    pub async fn update_openid_server(
        &self,
        server: &OpenIdServer,
    ) -> Result<OpenIdServer, ApiError> {
        let pid = server.pid.ok_or_else(|| {
            ApiError::InvalidConfig("identity provider pid is required for update".to_string())
        })?;
        self.put(
            &OpenIdServer::item_path(&server.scope(), &pid.to_string()),
            server,
        )
        .await
    }
}
