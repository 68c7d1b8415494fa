//! Attribute mapping for OpenID clients

use reconcile::{AttributeMapped, Attributes, ReconcileError, Result, Value};

use super::{format_timestamp, get_string_set, get_timestamp, string_set_value};
use crate::api::{ClientSecret, GrantType, OpenIdClient, UserPermission};

impl AttributeMapped for OpenIdClient {
    fn to_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set_opt("pid", self.pid);
        attrs.set("client_id", self.client_id.as_str());
        attrs.set("client_name", self.client_name.as_str());
        attrs.set("node_id", self.node_id.as_str());
        attrs.set("module_id", self.module_id.as_str());
        attrs.set(
            "access_token_validity_seconds",
            self.access_token_validity_seconds,
        );
        attrs.set(
            "refresh_token_validity_seconds",
            self.refresh_token_validity_seconds,
        );
        attrs.set(
            "allowed_grant_types",
            Value::List(
                self.allowed_grant_types
                    .iter()
                    .map(|g| Value::String(g.as_str().to_string()))
                    .collect(),
            ),
        );
        attrs.set("auto_approve_scopes", string_set_value(&self.auto_approve_scopes));
        attrs.set("auto_grant_scopes", string_set_value(&self.auto_grant_scopes));
        attrs.set("scopes", string_set_value(&self.scopes));
        attrs.set(
            "registered_redirect_uris",
            string_set_value(&self.registered_redirect_uris),
        );
        attrs.set(
            "client_secrets",
            Value::List(self.client_secrets.iter().map(secret_value).collect()),
        );
        attrs.set(
            "permissions",
            Value::List(self.permissions.iter().map(permission_value).collect()),
        );
        attrs.set("fixed_scope", self.fixed_scope);
        attrs.set("secret_required", self.secret_required);
        attrs.set("secret_client_can_change", self.secret_client_can_change);
        attrs.set("enabled", self.enabled);
        attrs.set("can_introspect_any_tokens", self.can_introspect_any_tokens);
        attrs.set("can_introspect_own_tokens", self.can_introspect_own_tokens);
        attrs.set("always_require_approval", self.always_require_approval);
        attrs.set("can_reissue_tokens", self.can_reissue_tokens);
        attrs.set("remember_approved_scopes", self.remember_approved_scopes);
        attrs.set("attestation_accepted", self.attestation_accepted);
        attrs.set_opt("public_jwks_uri", self.public_jwks_uri.clone());
        attrs.set_opt("archived_at", self.archived_at.map(format_timestamp));
        attrs.set("created_by_app_sphere", self.created_by_app_sphere);
        attrs
    }

    fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let defaults = OpenIdClient::default();

        let client_id = attrs
            .get_string("client_id")?
            .ok_or_else(|| ReconcileError::Validation("client_id is required".to_string()))?;
        let client_name = attrs
            .get_string("client_name")?
            .ok_or_else(|| ReconcileError::Validation("client_name is required".to_string()))?;

        let mut allowed_grant_types = std::collections::BTreeSet::new();
        if let Some(raw) = attrs.get_string_list("allowed_grant_types")? {
            for grant in raw {
                let parsed = GrantType::parse(&grant).map_err(|_| {
                    ReconcileError::Validation(format!("unknown grant type '{}'", grant))
                })?;
                allowed_grant_types.insert(parsed);
            }
        }

        let mut client_secrets = Vec::new();
        for block in attrs.get_blocks("client_secrets")? {
            client_secrets.push(secret_from_attributes(&block)?);
        }

        let mut permissions = Vec::new();
        for block in attrs.get_blocks("permissions")? {
            permissions.push(permission_from_attributes(&block)?);
        }

        Ok(OpenIdClient {
            pid: attrs.get_int("pid")?,
            client_id,
            client_name,
            node_id: attrs.get_string("node_id")?.unwrap_or(defaults.node_id),
            module_id: attrs.get_string("module_id")?.unwrap_or(defaults.module_id),
            access_token_validity_seconds: attrs
                .get_int("access_token_validity_seconds")?
                .unwrap_or(defaults.access_token_validity_seconds),
            refresh_token_validity_seconds: attrs
                .get_int("refresh_token_validity_seconds")?
                .unwrap_or(defaults.refresh_token_validity_seconds),
            allowed_grant_types,
            auto_approve_scopes: get_string_set(attrs, "auto_approve_scopes")?,
            auto_grant_scopes: get_string_set(attrs, "auto_grant_scopes")?,
            scopes: get_string_set(attrs, "scopes")?,
            registered_redirect_uris: get_string_set(attrs, "registered_redirect_uris")?,
            client_secrets,
            permissions,
            fixed_scope: attrs.get_bool("fixed_scope")?.unwrap_or(defaults.fixed_scope),
            secret_required: attrs
                .get_bool("secret_required")?
                .unwrap_or(defaults.secret_required),
            secret_client_can_change: attrs
                .get_bool("secret_client_can_change")?
                .unwrap_or(defaults.secret_client_can_change),
            enabled: attrs.get_bool("enabled")?.unwrap_or(defaults.enabled),
            can_introspect_any_tokens: attrs
                .get_bool("can_introspect_any_tokens")?
                .unwrap_or(defaults.can_introspect_any_tokens),
            can_introspect_own_tokens: attrs
                .get_bool("can_introspect_own_tokens")?
                .unwrap_or(defaults.can_introspect_own_tokens),
            always_require_approval: attrs
                .get_bool("always_require_approval")?
                .unwrap_or(defaults.always_require_approval),
            can_reissue_tokens: attrs
                .get_bool("can_reissue_tokens")?
                .unwrap_or(defaults.can_reissue_tokens),
            remember_approved_scopes: attrs
                .get_bool("remember_approved_scopes")?
                .unwrap_or(defaults.remember_approved_scopes),
            attestation_accepted: attrs
                .get_bool("attestation_accepted")?
                .unwrap_or(defaults.attestation_accepted),
            public_jwks_uri: attrs.get_string("public_jwks_uri")?,
            archived_at: get_timestamp(attrs, "archived_at")?,
            created_by_app_sphere: attrs
                .get_bool("created_by_app_sphere")?
                .unwrap_or(defaults.created_by_app_sphere),
        })
    }
}

fn secret_value(secret: &ClientSecret) -> Value {
    let mut attrs = Attributes::new();
    attrs.set_opt("pid", secret.pid);
    attrs.set_opt("secret", secret.secret.clone());
    attrs.set_opt("description", secret.description.clone());
    attrs.set_opt("activation", secret.activation.map(format_timestamp));
    attrs.set_opt("expiration", secret.expiration.map(format_timestamp));
    attrs.into()
}

fn secret_from_attributes(attrs: &Attributes) -> Result<ClientSecret> {
    Ok(ClientSecret {
        pid: attrs.get_int("pid")?,
        secret: attrs.get_string("secret")?,
        description: attrs.get_string("description")?,
        activation: get_timestamp(attrs, "activation")?,
        expiration: get_timestamp(attrs, "expiration")?,
    })
}

fn permission_value(permission: &UserPermission) -> Value {
    let mut attrs = Attributes::new();
    attrs.set("permission", permission.permission.as_str());
    attrs.set_opt("argument", permission.argument.clone());
    attrs.into()
}

fn permission_from_attributes(attrs: &Attributes) -> Result<UserPermission> {
    Ok(UserPermission {
        permission: attrs
            .get_string("permission")?
            .ok_or_else(|| ReconcileError::Validation("permission name is required".to_string()))?,
        argument: attrs.get_string("argument")?,
    })
}
