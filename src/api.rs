use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Category, CategoryDraft, CategoryId};

// Remote side of the app: the category REST contract and its reqwest-backed client.

/// Failure talking to the category service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("could not decode response of {method} {url}: {source}")]
    Decode {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Operations offered by the remote category service.
pub trait CategoryApi: Send + Sync {
    fn list(&self) -> Result<Vec<Category>, ApiError>;
    fn create(&self, draft: &CategoryDraft) -> Result<Category, ApiError>;
    fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Category, ApiError>;
    fn delete(&self, id: CategoryId) -> Result<(), ApiError>;
}

/// Blocking HTTP client for `{base}/categories`. Meant to be called from worker threads.
pub struct HttpCategoryApi {
    client: Client,
    base_url: String,
}

impl HttpCategoryApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("category-manager/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    pub fn item_url(&self, id: CategoryId) -> String {
        format!("{}/categories/{}", self.base_url, id)
    }
}

impl CategoryApi for HttpCategoryApi {
    fn list(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.collection_url();
        let resp = self.client.get(&url).send();
        decode_json("GET", &url, checked("GET", &url, resp)?)
    }

    fn create(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        let url = self.collection_url();
        let resp = self.client.post(&url).json(draft).send();
        decode_json("POST", &url, checked("POST", &url, resp)?)
    }

    fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Category, ApiError> {
        let url = self.item_url(id);
        let resp = self.client.put(&url).json(draft).send();
        decode_json("PUT", &url, checked("PUT", &url, resp)?)
    }

    fn delete(&self, id: CategoryId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        let resp = self.client.delete(&url).send();
        // acknowledgement body is not interesting, only the status
        checked("DELETE", &url, resp).map(|_| ())
    }
}

/// Map transport failures and non-2xx statuses to `ApiError`.
fn checked(
    method: &'static str,
    url: &str,
    resp: reqwest::Result<Response>,
) -> Result<Response, ApiError> {
    let resp = resp.map_err(|source| ApiError::Transport {
        method,
        url: url.to_string(),
        source,
    })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            method,
            url: url.to_string(),
            status,
        });
    }
    Ok(resp)
}

fn decode_json<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    resp: Response,
) -> Result<T, ApiError> {
    resp.json::<T>().map_err(|source| ApiError::Decode {
        method,
        url: url.to_string(),
        source,
    })
}
