//! OpenID client store binding

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reconcile::{Declared, ReconcileError, RemoteStore, Result, Scope};

use crate::api::{Client, OpenIdClient};

fn valid_client_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl Declared for OpenIdClient {
    fn natural_key(&self) -> &str {
        &self.client_id
    }

    fn scope(&self) -> Scope {
        OpenIdClient::scope(self)
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
        if !valid_client_id(&self.client_id) {
            return Err(ReconcileError::Validation(format!(
                "client id '{}' may only contain letters, digits, '.', '_' and '-'",
                self.client_id
            )));
        }
        if self.client_name.is_empty() {
            return Err(ReconcileError::Validation(
                "client name must not be empty".to_string(),
            ));
        }
        if self.access_token_validity_seconds <= 0 || self.refresh_token_validity_seconds <= 0 {
            return Err(ReconcileError::Validation(
                "token validity must be positive".to_string(),
            ));
        }
        for secret in &self.client_secrets {
            if let (Some(activation), Some(expiration)) = (secret.activation, secret.expiration) {
                if activation >= expiration {
                    return Err(ReconcileError::Validation(format!(
                        "client secret activation {} is not before expiration {}",
                        activation, expiration
                    )));
                }
            }
        }
        for permission in &self.permissions {
            if permission.permission.is_empty() {
                return Err(ReconcileError::Validation(
                    "permission name must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Binds the client endpoints to the reconciler's store verbs.
#[derive(Clone)]
pub struct OpenIdClientStore {
    client: Client,
}

impl OpenIdClientStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteStore for OpenIdClientStore {
    type Record = OpenIdClient;

    async fn create(&self, record: &OpenIdClient) -> Result<OpenIdClient> {
        self.client
            .create_openid_client(record)
            .await
            .map_err(Into::into)
    }

    async fn fetch(&self, scope: &Scope, natural_key: &str) -> Result<OpenIdClient> {
        self.client
            .get_openid_client(scope, natural_key)
            .await
            .map_err(Into::into)
    }

    async fn update(&self, record: &OpenIdClient) -> Result<OpenIdClient> {
        self.client
            .update_openid_client(record)
            .await
            .map_err(Into::into)
    }
}
