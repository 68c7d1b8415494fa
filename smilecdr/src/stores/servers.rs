//! OpenID identity provider store binding

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reconcile::{Declared, ReconcileError, RemoteStore, Result, Scope};
use url::Url;

use crate::api::{Client, OpenIdServer};

impl Declared for OpenIdServer {
    fn natural_key(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> Scope {
        OpenIdServer::scope(self)
    }

    fn server_identity(&self) -> Option<i64> {
        self.pid
    }

    fn set_server_identity(&mut self, identity: i64) {
        self.pid = Some(identity);
    }

    fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    fn set_archived_at(&mut self, at: Option<DateTime<Utc>>) {
        self.archived_at = at;
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ReconcileError::Validation(
                "identity provider name must not be empty".to_string(),
            ));
        }
        if self.issuer.is_empty() {
            return Err(ReconcileError::Validation(
                "issuer URL must not be empty".to_string(),
            ));
        }
        Url::parse(&self.issuer).map_err(|e| {
            ReconcileError::Validation(format!("issuer '{}' is not a valid URL: {}", self.issuer, e))
        })?;
        Ok(())
    }
}

/// Binds the identity provider endpoints to the reconciler's store verbs.
///
/// The admin API exposes no fetch-by-name endpoint for identity providers, so
/// `fetch` lists the module scope and selects the record itself: the active
/// generation wins; with only archived generations the highest pid (the most
/// recent) is returned.
#[derive(Clone)]
pub struct OpenIdServerStore {
    client: Client,
}

impl OpenIdServerStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteStore for OpenIdServerStore {
    type Record = OpenIdServer;

    async fn create(&self, record: &OpenIdServer) -> Result<OpenIdServer> {
        self.client
            .create_openid_server(record)
            .await
            .map_err(Into::into)
    }

    async fn fetch(&self, scope: &Scope, natural_key: &str) -> Result<OpenIdServer> {
        let servers = self.client.list_openid_servers(scope).await?;

        let matching: Vec<&OpenIdServer> =
            servers.iter().filter(|s| s.name == natural_key).collect();

        matching
            .iter()
            .find(|s| s.archived_at.is_none())
            .or_else(|| matching.iter().max_by_key(|s| s.pid))
            .map(|s| (**s).clone())
            .ok_or_else(|| {
                ReconcileError::NotFound(format!(
                    "identity provider '{}' not found in scope {}",
                    natural_key, scope
                ))
            })
    }

    async fn update(&self, record: &OpenIdServer) -> Result<OpenIdServer> {
        self.client
            .update_openid_server(record)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RetryConfig;
    use crate::Config;
    use mockito::Server;

    fn test_store(url: &str) -> OpenIdServerStore {
        let config = Config::new(url, "admin", "password");
        let retries = RetryConfig {
            max_retries: 0,
            initial_backoff_ms: 1,
            max_backoff_ms: 1,
            timeout_seconds: 5,
        };
        OpenIdServerStore::new(Client::with_config(&config, retries).unwrap())
    }

    fn named(name: &str) -> OpenIdServer {
        OpenIdServer {
            name: name.to_string(),
            issuer: "https://idp.example.com/realms/main".to_string(),
            ..OpenIdServer::default()
        }
    }

    #[test]
    fn validate_requires_absolute_issuer_url() {
        let mut server = named("upstream");
        assert!(server.validate().is_ok());

        server.issuer = "idp.example.com".to_string();
        assert!(server.validate().is_err());

        server.issuer = String::new();
        assert!(server.validate().is_err());
    }

    #[tokio::test]
    async fn fetch_prefers_the_active_generation() {
        let mut mock_server = Server::new_async().await;
        let _mock = mock_server
            .mock("GET", "/openid-connect-servers/Master/smart_auth")
            .with_body(
                r#"[
                    {"pid":10,"name":"upstream","issuer":"https://idp.example.com","archivedAt":"2024-01-01T00:00:00Z"},
                    {"pid":11,"name":"upstream","issuer":"https://idp.example.com"},
                    {"pid":12,"name":"other","issuer":"https://other.example.com"}
                ]"#,
            )
            .create_async()
            .await;

        let store = test_store(&mock_server.url());
        let scope = Scope::new("Master", "smart_auth");

        let found = store.fetch(&scope, "upstream").await.unwrap();
        assert_eq!(found.pid, Some(11));
        assert!(found.archived_at.is_none());
    }

    #[tokio::test]
    async fn fetch_falls_back_to_latest_archived_generation() {
        let mut mock_server = Server::new_async().await;
        let _mock = mock_server
            .mock("GET", "/openid-connect-servers/Master/smart_auth")
            .with_body(
                r#"[
                    {"pid":10,"name":"upstream","issuer":"https://idp.example.com","archivedAt":"2024-01-01T00:00:00Z"},
                    {"pid":14,"name":"upstream","issuer":"https://idp.example.com","archivedAt":"2024-02-01T00:00:00Z"}
                ]"#,
            )
            .create_async()
            .await;

        let store = test_store(&mock_server.url());
        let scope = Scope::new("Master", "smart_auth");

        let found = store.fetch(&scope, "upstream").await.unwrap();
        assert_eq!(found.pid, Some(14));
    }

    #[tokio::test]
    async fn fetch_of_unknown_name_is_not_found() {
        let mut mock_server = Server::new_async().await;
        let _mock = mock_server
            .mock("GET", "/openid-connect-servers/Master/smart_auth")
            .with_body("[]")
            .create_async()
            .await;

        let store = test_store(&mock_server.url());
        let scope = Scope::new("Master", "smart_auth");

        let err = store.fetch(&scope, "upstream").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
