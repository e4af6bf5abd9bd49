//! Client wrappers for application management endpoints.

use crate::api::{config::encode_path, ApiClient, AppError, Session};
use crate::features::applications::types::{
    Application, ApplicationList, AuthenticationSequence, UpdateAuthenticationSequenceRequest,
};
use tracing::instrument;

/// Lists the organization's applications, optionally narrowed to one name.
#[instrument(skip(client, session))]
pub async fn list_current_applications(
    client: &ApiClient,
    session: &Session,
    name_filter: Option<&str>,
) -> Result<ApplicationList, AppError> {
    match name_filter {
        Some(name) => {
            let filter = format!("name eq {name}");
            client
                .get_json(session, "/applications", &[("filter", filter.as_str())])
                .await
        }
        None => client.get_json(session, "/applications", &[]).await,
    }
}

/// Fetches one application including its authentication sequence.
#[instrument(skip(client, session))]
pub async fn get_application(
    client: &ApiClient,
    session: &Session,
    application_id: &str,
) -> Result<Application, AppError> {
    let path = encode_path(&["applications", application_id])?;
    client.get_json(session, &path, &[]).await
}

/// Replaces the login flow of an application and returns the updated application.
#[instrument(skip(client, session, sequence))]
pub async fn update_authentication_sequence(
    client: &ApiClient,
    session: &Session,
    application_id: &str,
    sequence: &AuthenticationSequence,
) -> Result<Application, AppError> {
    let path = encode_path(&["applications", application_id])?;
    let request = UpdateAuthenticationSequenceRequest {
        authentication_sequence: sequence,
    };
    client.patch_json(session, &path, &request).await
}
