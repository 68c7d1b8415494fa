//! Attribute mapping for OpenID identity providers

use reconcile::{AttributeMapped, Attributes, ReconcileError, Result};

use super::{format_timestamp, get_timestamp};
use crate::api::OpenIdServer;

impl AttributeMapped for OpenIdServer {
    fn to_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set_opt("pid", self.pid);
        attrs.set("name", self.name.as_str());
        attrs.set("issuer", self.issuer.as_str());
        attrs.set("node_id", self.node_id.as_str());
        attrs.set("module_id", self.module_id.as_str());
        attrs.set_opt(
            "token_introspection_client_id",
            self.token_introspection_client_id.clone(),
        );
        attrs.set_opt(
            "token_introspection_client_secret",
            self.token_introspection_client_secret.clone(),
        );
        attrs.set_opt("validation_jwk_text", self.validation_jwk_text.clone());
        attrs.set_opt("validation_jwk_file", self.validation_jwk_file.clone());
        attrs.set_opt(
            "federation_registration_id",
            self.federation_registration_id.clone(),
        );
        attrs.set_opt(
            "federation_request_scopes",
            self.federation_request_scopes.clone(),
        );
        attrs.set_opt(
            "federation_authorization_url",
            self.federation_authorization_url.clone(),
        );
        attrs.set_opt("federation_token_url", self.federation_token_url.clone());
        attrs.set_opt(
            "federation_user_info_url",
            self.federation_user_info_url.clone(),
        );
        attrs.set_opt("federation_jwk_set_url", self.federation_jwk_set_url.clone());
        attrs.set_opt(
            "auth_well_known_config_url",
            self.auth_well_known_config_url.clone(),
        );
        attrs.set_opt("fhir_endpoint_url", self.fhir_endpoint_url.clone());
        attrs.set_opt("response_type", self.response_type.clone());
        attrs.set_opt("audience", self.audience.clone());
        attrs.set_opt("notes", self.notes.clone());
        attrs.set_opt("archived_at", self.archived_at.map(format_timestamp));
        attrs
    }

    fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let name = attrs
            .get_string("name")?
            .ok_or_else(|| ReconcileError::Validation("name is required".to_string()))?;
        let issuer = attrs
            .get_string("issuer")?
            .ok_or_else(|| ReconcileError::Validation("issuer is required".to_string()))?;

        let defaults = OpenIdServer::default();

        Ok(OpenIdServer {
            pid: attrs.get_int("pid")?,
            name,
            issuer,
            node_id: attrs.get_string("node_id")?.unwrap_or(defaults.node_id),
            module_id: attrs.get_string("module_id")?.unwrap_or(defaults.module_id),
            token_introspection_client_id: attrs.get_string("token_introspection_client_id")?,
            token_introspection_client_secret: attrs
                .get_string("token_introspection_client_secret")?,
            validation_jwk_text: attrs.get_string("validation_jwk_text")?,
            validation_jwk_file: attrs.get_string("validation_jwk_file")?,
            federation_registration_id: attrs.get_string("federation_registration_id")?,
            federation_request_scopes: attrs.get_string("federation_request_scopes")?,
            federation_authorization_url: attrs.get_string("federation_authorization_url")?,
            federation_token_url: attrs.get_string("federation_token_url")?,
            federation_user_info_url: attrs.get_string("federation_user_info_url")?,
            federation_jwk_set_url: attrs.get_string("federation_jwk_set_url")?,
            auth_well_known_config_url: attrs.get_string("auth_well_known_config_url")?,
            fhir_endpoint_url: attrs.get_string("fhir_endpoint_url")?,
            response_type: attrs.get_string("response_type")?,
            audience: attrs.get_string("audience")?,
            notes: attrs.get_string("notes")?,
            archived_at: get_timestamp(attrs, "archived_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_declared_attributes() {
        let mut attrs = Attributes::new();
        attrs.set("name", "upstream");
        attrs.set("issuer", "https://idp.example.com/realms/main");
        attrs.set("federation_request_scopes", "openid profile");

        let server = OpenIdServer::from_attributes(&attrs).unwrap();
        assert_eq!(server.node_id, "Master");
        assert_eq!(
            server.federation_request_scopes.as_deref(),
            Some("openid profile")
        );

        let rendered = server.to_attributes();
        let reparsed = OpenIdServer::from_attributes(&rendered).unwrap();
        assert_eq!(server, reparsed);
    }

    #[test]
    fn from_attributes_requires_name_and_issuer() {
        let mut attrs = Attributes::new();
        attrs.set("name", "upstream");

        let err = OpenIdServer::from_attributes(&attrs).unwrap_err();
        assert!(matches!(err, ReconcileError::Validation(_)));
        assert!(err.to_string().contains("issuer"));
    }
}
