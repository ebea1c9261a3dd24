use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::SourceError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds the shared `reqwest` client with request timeout and `User-Agent`.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent)
        .build()?)
}

/// Sends `request` and decodes a JSON body, mapping non-2xx statuses to
/// typed errors. `url` and `context` only feed error messages.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
    context: &str,
) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            url: url.to_owned(),
        });
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SourceError::Unauthorized {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| SourceError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
