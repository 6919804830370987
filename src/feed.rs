use gloo::net::http::Request;

use vitrine_core::{FeedError, ProjectStore};

/// The session's single feed request. No retry: any failure is final.
pub(crate) async fn fetch_projects(url: &str) -> Result<ProjectStore, FeedError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| FeedError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(FeedError::Status(response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|err| FeedError::Network(err.to_string()))?;
    ProjectStore::from_json(&text)
}
