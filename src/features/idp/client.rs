//! Client wrappers for identity provider endpoints.

use crate::api::{config::encode_path, ApiClient, AppError, Session};
use crate::features::idp::types::{IdentityProvider, PatchOperation};
use tracing::instrument;

/// Applies `operations` to an identity provider and returns the updated provider.
#[instrument(skip(client, session, operations), fields(operations = operations.len()))]
pub async fn patch_identity_provider(
    client: &ApiClient,
    session: &Session,
    idp_id: &str,
    operations: &[PatchOperation],
) -> Result<IdentityProvider, AppError> {
    let path = encode_path(&["identity-providers", idp_id])?;
    client.patch_json(session, &path, operations).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn patch_sends_operation_array() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/identity-providers/idp-1"))
            .and(body_json(json!([
                {"operation": "REPLACE", "path": "/isEnabled", "value": false}
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "idp-1",
                "name": "SMS",
                "isEnabled": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(&server.uri(), None).unwrap()).unwrap();
        let session = Session::new(SecretString::from("token".to_string()), "org1");
        let idp = patch_identity_provider(
            &client,
            &session,
            "idp-1",
            &[PatchOperation::replace("/isEnabled", json!(false))],
        )
        .await
        .unwrap();
        assert_eq!(idp.is_enabled, Some(false));
    }

    #[tokio::test]
    async fn patch_surfaces_not_found() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/identity-providers/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(&server.uri(), None).unwrap()).unwrap();
        let session = Session::new(SecretString::from("token".to_string()), "org1");
        let result = patch_identity_provider(&client, &session, "missing", &[]).await;
        assert_eq!(
            result.unwrap_err(),
            AppError::Http {
                status: 404,
                message: "Request failed.".to_string()
            }
        );
    }
}
