//! HTTP client for the experiment platform API.

use std::time::Duration;

use thiserror::Error;

use mindiff_core::protocol::{
    Experiment, ExperimentStatus, Metric, MetricAssignmentRequest, MetricListResponse,
};

/// Errors that can occur when talking to the platform.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid base URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request to the platform failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the request.
    #[error("Platform rejected the request: {0}")]
    Api(String),

    /// Metric assignment requires a staging experiment.
    #[error("Experiment {experiment_id} is {status:?}; metrics can only be assigned while staging")]
    NotStaging {
        experiment_id: u64,
        status: ExperimentStatus,
    },
}

/// Client for the experiment platform's REST API.
pub struct PlatformClient {
    base_url: String,
    client: reqwest::Client,
}

impl PlatformClient {
    /// Connect to the platform at the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be
    /// created.
    pub fn connect(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            )));
        }

        // Remove trailing slash if present
        let base_url = url.trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidUrl(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the platform's metric catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_metrics(&self) -> Result<Vec<Metric>, ClientError> {
        let url = format!("{}/metrics", self.base_url);
        let response: MetricListResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.metrics)
    }

    /// Fetch a single experiment definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_experiment(&self, experiment_id: u64) -> Result<Experiment, ClientError> {
        let url = format!("{}/experiments/{}", self.base_url, experiment_id);
        let experiment = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(experiment)
    }

    /// Submit a metric assignment for an experiment.
    ///
    /// The experiment must be in the staging state; assignments to
    /// experiments in any other state are rejected before the request is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotStaging`] for a non-staging experiment,
    /// and [`ClientError::Api`] when the platform rejects the submission.
    pub async fn assign_metric(
        &self,
        experiment_id: u64,
        assignment: &MetricAssignmentRequest,
    ) -> Result<(), ClientError> {
        let experiment = self.fetch_experiment(experiment_id).await?;
        if experiment.status != ExperimentStatus::Staging {
            return Err(ClientError::NotStaging {
                experiment_id,
                status: experiment.status,
            });
        }

        let url = format!(
            "{}/experiments/{}/metric-assignments",
            self.base_url, experiment_id
        );
        let response = self.client.post(&url).json(assignment).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}
