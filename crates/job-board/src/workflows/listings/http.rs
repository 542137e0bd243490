use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::domain::{ApplicationRequest, Job, JobId};
use super::gateway::{GatewayError, JobsGateway};
use crate::config::ApiConfig;

/// `JobsGateway` backed by the job service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpJobsGateway {
    client: Client,
    base_url: Url,
}

impl HttpJobsGateway {
    pub fn from_config(config: &ApiConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| GatewayError::InvalidUrl(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GatewayError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Joins percent-encoded segments onto the base url, keeping any base path prefix.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn expect_status(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
        expected: StatusCode,
    ) -> Result<reqwest::Response, GatewayError> {
        let path = url.path().to_string();
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        debug!(%path, status = status.as_u16(), "job service responded");
        if status != expected {
            return Err(GatewayError::UnexpectedStatus {
                path,
                status: status.as_u16(),
                expected: expected.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl JobsGateway for HttpJobsGateway {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        let url = self.endpoint(&["api", "v1", "jobs"])?;
        let response = self
            .expect_status(self.client.get(url.clone()), &url, StatusCode::OK)
            .await?;
        response
            .json::<Vec<Job>>()
            .await
            .map_err(|source| GatewayError::Decode {
                path: url.path().to_string(),
                source,
            })
    }

    async fn submit_application(&self, request: &ApplicationRequest) -> Result<(), GatewayError> {
        let url = self.endpoint(&["api", "v1", "applications"])?;
        self.expect_status(
            self.client.post(url.clone()).json(request),
            &url,
            StatusCode::CREATED,
        )
        .await?;
        Ok(())
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), GatewayError> {
        let url = self.endpoint(&["api", "v1", "jobs", &id.0])?;
        self.expect_status(self.client.delete(url.clone()), &url, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }

    async fn detach_job(&self, recruiter_email: &str, id: &JobId) -> Result<(), GatewayError> {
        let url = self.endpoint(&["api", "v1", "recruiters", recruiter_email, "removejob"])?;
        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(id.0.clone());
        self.expect_status(request, &url, StatusCode::OK).await?;
        Ok(())
    }
}
