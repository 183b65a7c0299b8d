use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::candidate_dto::{CandidatePatch, NewCandidate};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::cv_upload::CvUpload;
use crate::models::extracted::ExtractedFields;

/// The remote record service as seen by the store adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteRecords: Send + Sync {
    async fn health(&self) -> Result<()>;
    async fn parse_cv(&self, upload: &CvUpload) -> Result<ExtractedFields>;
    async fn list(&self) -> Result<Vec<Candidate>>;
    async fn get(&self, id: &str) -> Result<Candidate>;
    async fn create(&self, payload: &NewCandidate) -> Result<Candidate>;
    async fn update(&self, id: &str, patch: &CandidatePatch) -> Result<Candidate>;
}

#[derive(Clone)]
pub struct RemoteStoreClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl RemoteStoreClient {
    pub fn new(base_url: &str, request_timeout: Duration, health_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a non-2xx answer into an application-class error, otherwise
/// decodes the JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Remote {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl RemoteRecords for RemoteStoreClient {
    async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(self.url("/"))
            .timeout(self.health_timeout)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Remote {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }

    async fn parse_cv(&self, upload: &CvUpload) -> Result<ExtractedFields> {
        let mut part = multipart::Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        tracing::info!(file = %upload.file_name, "Sending CV to remote parser");
        let response = self
            .client
            .post(self.url("/upload-cv"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn list(&self) -> Result<Vec<Candidate>> {
        let response = self.client.get(self.url("/candidates")).send().await?;
        decode(response).await
    }

    async fn get(&self, id: &str) -> Result<Candidate> {
        let response = self
            .client
            .get(self.url(&format!("/candidates/{}", id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Candidate {} not found", id)));
        }
        decode(response).await
    }

    async fn create(&self, payload: &NewCandidate) -> Result<Candidate> {
        let response = self
            .client
            .post(self.url("/candidates"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: &str, patch: &CandidatePatch) -> Result<Candidate> {
        let response = self
            .client
            .put(self.url(&format!("/candidates/{}", id)))
            .json(patch)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Candidate {} not found", id)));
        }
        decode(response).await
    }
}
