/// REST client for the gallery backend
///
/// A thin wrapper over `reqwest` that owns the base URL and the optional
/// bearer token. Mutating calls parse the success-flag envelope and turn
/// `success: false` into an error, so callers only ever observe a plain
/// `Result`. The client is cheap to clone and is handed to background
/// tasks by value.
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::state::data::MediaItem;

use super::dto::{CategoryDto, MediaItemDto, MediaUpload, MutationResponse};
use super::error::ApiError;

#[derive(Debug, Clone)]
pub struct GalleryApi {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl GalleryApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetch the full media list and ingest it into domain records.
    pub async fn fetch_gallery(&self) -> Result<Vec<MediaItem>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, self.url("gallery"))
            .send()
            .await?;
        let response = check_status(response).await?;

        let records: Vec<MediaItemDto> = response.json().await?;
        debug!("fetched {} gallery records", records.len());
        Ok(records.into_iter().map(MediaItem::from).collect())
    }

    /// Fetch category titles for a scope, dropping soft-deleted entries.
    pub async fn fetch_categories(&self, scope: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, self.url("categories"))
            .query(&[("scope", scope)])
            .send()
            .await?;
        let response = check_status(response).await?;

        let records: Vec<CategoryDto> = response.json().await?;
        Ok(records
            .into_iter()
            .filter(|category| !category.is_deleted)
            .map(|category| category.title)
            .collect())
    }

    /// Upload a new media item: the file plus its metadata, as multipart.
    pub async fn create_media(&self, upload: &MediaUpload, file: PathBuf) -> Result<(), ApiError> {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = tokio::fs::read(&file)
            .await
            .map_err(|error| ApiError::Transport(format!("read {}: {error}", file.display())))?;

        let metadata =
            serde_json::to_string(upload).map_err(|error| ApiError::Decode(error.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("payload", metadata)
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .request(reqwest::Method::POST, self.url("gallery"))
            .multipart(form)
            .send()
            .await?;
        check_mutation(response).await
    }

    /// Update the metadata of an existing media item.
    pub async fn update_media(&self, id: &str, upload: &MediaUpload) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PUT, self.url(&format!("gallery/{id}")))
            .json(upload)
            .send()
            .await?;
        check_mutation(response).await
    }

    /// Delete a single media item.
    pub async fn delete_media(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, self.url(&format!("gallery/{id}")))
            .send()
            .await?;
        check_mutation(response).await
    }

    /// Delete every item of an album, one request at a time.
    ///
    /// Requests are issued sequentially and the first failure aborts the
    /// batch; items past that point stay untouched and reappear in the
    /// refetch that follows.
    pub async fn delete_all(&self, ids: &[String]) -> Result<(), ApiError> {
        for id in ids {
            if let Err(error) = self.delete_media(id).await {
                warn!("album delete stopped at {id}: {error}");
                return Err(error);
            }
        }
        Ok(())
    }

    /// Fetch the raw bytes behind a media file reference.
    ///
    /// The backend stores either absolute URLs or paths relative to the
    /// API host; both are accepted here.
    pub async fn fetch_preview(&self, file: &str) -> Result<Vec<u8>, ApiError> {
        let url = if file.starts_with("http://") || file.starts_with("https://") {
            file.to_string()
        } else {
            self.url(file)
        };

        let response = self.request(reqwest::Method::GET, url).send().await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn an HTTP error status into an `ApiError`, pulling the message out
/// of the body envelope when the server sent one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<MutationResponse>().await {
        Ok(body) => body.message.unwrap_or_default(),
        Err(_) => String::new(),
    };
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Validate a mutating call: error statuses and `success: false` bodies
/// both fail the operation.
async fn check_mutation(response: reqwest::Response) -> Result<(), ApiError> {
    let response = check_status(response).await?;
    let body: MutationResponse = response.json().await?;
    if body.success {
        Ok(())
    } else {
        Err(ApiError::Rejected(body.message.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> GalleryApi {
        GalleryApi::new(&AppConfig {
            base_url: base_url.to_string(),
            auth_token: None,
            page_size: 15,
        })
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let api = api("https://cms.example.edu/api/");
        assert_eq!(api.url("gallery"), "https://cms.example.edu/api/gallery");
        assert_eq!(
            api.url("/gallery/42"),
            "https://cms.example.edu/api/gallery/42"
        );
    }
}
