//! OpenID Connect client definitions and endpoints

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use reconcile::Scope;
use serde::{Deserialize, Serialize};

use super::super::common::AdminResource;
use super::super::error::ApiError;

pub const DEFAULT_NODE_ID: &str = "Master";
pub const DEFAULT_MODULE_ID: &str = "smart_auth";

pub const DEFAULT_ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 300;
pub const DEFAULT_REFRESH_TOKEN_VALIDITY_SECONDS: i64 = 86400;

/// OAuth2/OIDC authorization flow a client is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantType {
    AuthorizationCode,
    ClientCredentials,
    Implicit,
    JwtBearer,
    Password,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "AUTHORIZATION_CODE",
            GrantType::ClientCredentials => "CLIENT_CREDENTIALS",
            GrantType::Implicit => "IMPLICIT",
            GrantType::JwtBearer => "JWT_BEARER",
            GrantType::Password => "PASSWORD",
            GrantType::RefreshToken => "REFRESH_TOKEN",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "AUTHORIZATION_CODE" => Ok(GrantType::AuthorizationCode),
            "CLIENT_CREDENTIALS" => Ok(GrantType::ClientCredentials),
            "IMPLICIT" => Ok(GrantType::Implicit),
            "JWT_BEARER" => Ok(GrantType::JwtBearer),
            "PASSWORD" => Ok(GrantType::Password),
            "REFRESH_TOKEN" => Ok(GrantType::RefreshToken),
            other => Err(ApiError::InvalidConfig(format!(
                "unknown grant type '{}'",
                other
            ))),
        }
    }
}

/// One secret registered for a client.
///
/// The server generates the secret value when one is omitted on create; the
/// generated value comes back on the create read-back only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Permission granted to tokens issued for a client.
///
/// Permission names are configuration data defined by the server release, so
/// they are passed through as-is rather than validated against a frozen list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermission {
    pub permission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

/// OpenID Connect client registration as stored by the smart auth module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenIdClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    pub client_id: String,
    pub client_name: String,
    pub node_id: String,
    pub module_id: String,
    pub access_token_validity_seconds: i64,
    pub refresh_token_validity_seconds: i64,
    pub allowed_grant_types: BTreeSet<GrantType>,
    pub auto_approve_scopes: BTreeSet<String>,
    pub auto_grant_scopes: BTreeSet<String>,
    pub scopes: BTreeSet<String>,
    pub registered_redirect_uris: BTreeSet<String>,
    pub client_secrets: Vec<ClientSecret>,
    pub permissions: Vec<UserPermission>,
    pub fixed_scope: bool,
    pub secret_required: bool,
    pub secret_client_can_change: bool,
    pub enabled: bool,
    pub can_introspect_any_tokens: bool,
    pub can_introspect_own_tokens: bool,
    pub always_require_approval: bool,
    pub can_reissue_tokens: bool,
    pub remember_approved_scopes: bool,
    pub attestation_accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_jwks_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    pub created_by_app_sphere: bool,
}

impl Default for OpenIdClient {
    fn default() -> Self {
        Self {
            pid: None,
            client_id: String::new(),
            client_name: String::new(),
            node_id: DEFAULT_NODE_ID.to_string(),
            module_id: DEFAULT_MODULE_ID.to_string(),
            access_token_validity_seconds: DEFAULT_ACCESS_TOKEN_VALIDITY_SECONDS,
            refresh_token_validity_seconds: DEFAULT_REFRESH_TOKEN_VALIDITY_SECONDS,
            allowed_grant_types: BTreeSet::new(),
            auto_approve_scopes: BTreeSet::new(),
            auto_grant_scopes: BTreeSet::new(),
            scopes: BTreeSet::new(),
            registered_redirect_uris: BTreeSet::new(),
            client_secrets: Vec::new(),
            permissions: Vec::new(),
            fixed_scope: false,
            secret_required: false,
            secret_client_can_change: false,
            enabled: true,
            can_introspect_any_tokens: false,
            can_introspect_own_tokens: false,
            always_require_approval: false,
            can_reissue_tokens: false,
            remember_approved_scopes: false,
            attestation_accepted: false,
            public_jwks_uri: None,
            archived_at: None,
            created_by_app_sphere: false,
        }
    }
}

impl OpenIdClient {
    pub fn scope(&self) -> Scope {
        Scope::new(&self.node_id, &self.module_id)
    }
}

impl AdminResource for OpenIdClient {
    fn collection() -> &'static str {
        "openid-connect-clients"
    }
}

impl super::super::Client {
    /// List all client registrations in a module scope
    pub async fn list_openid_clients(
        &self,
        scope: &Scope,
    ) -> Result<Vec<OpenIdClient>, ApiError> {
        self.get(&OpenIdClient::collection_path(scope)).await
    }

    /// Get a client registration by client id
    pub async fn get_openid_client(
        &self,
        scope: &Scope,
        client_id: &str,
    ) -> Result<OpenIdClient, ApiError> {
        self.get(&OpenIdClient::item_path(scope, client_id)).await
    }

    /// Register a new client; the response carries the assigned pid
    pub async fn create_openid_client(
        &self,
        client: &OpenIdClient,
    ) -> Result<OpenIdClient, ApiError> {
        self.post(&OpenIdClient::collection_path(&client.scope()), client)
            .await
    }

    /// Overwrite an existing client registration by client id
    pub async fn update_openid_client(
        &self,
        client: &OpenIdClient,
    ) -> Result<OpenIdClient, ApiError> {
        self.put(
            &OpenIdClient::item_path(&client.scope(), &client.client_id),
            client,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Client, RetryConfig};
    use crate::Config;
    use mockito::Server;

    #[tokio::test]
    async fn list_returns_all_clients_in_scope() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/openid-connect-clients/Master/smart_auth")
            .with_body(
                r#"[
                    {"pid":1,"clientId":"app1","clientName":"App One"},
                    {"pid":2,"clientId":"app2","clientName":"App Two","enabled":false}
                ]"#,
            )
            .create_async()
            .await;

        let config = Config::new(server.url(), "admin", "password");
        let client = Client::with_config(
            &config,
            RetryConfig {
                max_retries: 0,
                initial_backoff_ms: 1,
                max_backoff_ms: 1,
                timeout_seconds: 5,
            },
        )
        .unwrap();

        let scope = Scope::new("Master", "smart_auth");
        let clients = client.list_openid_clients(&scope).await.unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].client_id, "app1");
        assert!(!clients[1].enabled);
    }

    #[test]
    fn defaults_match_module_configuration() {
        let client = OpenIdClient::default();
        assert_eq!(client.node_id, "Master");
        assert_eq!(client.module_id, "smart_auth");
        assert_eq!(client.access_token_validity_seconds, 300);
        assert_eq!(client.refresh_token_validity_seconds, 86400);
        assert!(client.enabled);
        assert!(client.pid.is_none());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let client = OpenIdClient {
            client_id: "app1".to_string(),
            client_name: "App One".to_string(),
            allowed_grant_types: [GrantType::AuthorizationCode].into_iter().collect(),
            ..OpenIdClient::default()
        };

        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["clientId"], "app1");
        assert_eq!(json["clientName"], "App One");
        assert_eq!(json["accessTokenValiditySeconds"], 300);
        assert_eq!(json["allowedGrantTypes"][0], "AUTHORIZATION_CODE");
        // unset optionals stay off the wire
        assert!(json.get("pid").is_none());
        assert!(json.get("archivedAt").is_none());
    }

    #[test]
    fn deserializes_sparse_payload_with_defaults() {
        let json = r#"{"pid":7,"clientId":"app1","clientName":"App One"}"#;
        let client: OpenIdClient = serde_json::from_str(json).unwrap();

        assert_eq!(client.pid, Some(7));
        assert_eq!(client.client_id, "app1");
        assert_eq!(client.module_id, "smart_auth");
        assert!(client.enabled);
        assert!(client.scopes.is_empty());
    }

    #[test]
    fn archived_at_round_trips_as_rfc3339() {
        let json = r#"{"clientId":"app1","clientName":"x","archivedAt":"2024-03-01T12:00:00Z"}"#;
        let client: OpenIdClient = serde_json::from_str(json).unwrap();
        assert!(client.archived_at.is_some());

        let out = serde_json::to_value(&client).unwrap();
        assert_eq!(out["archivedAt"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn grant_type_parse_rejects_unknown_flows() {
        assert!(GrantType::parse("AUTHORIZATION_CODE").is_ok());
        assert!(GrantType::parse("DEVICE_CODE").is_err());
    }
}
