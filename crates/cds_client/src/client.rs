use std::{path::Path, time::Duration};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Response;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    config::Credentials,
    error::{Error, Result},
    job::{describe_error_body, AssetValue, Job, JobStatus, Results},
    request::{Execution, Request},
    Retrieve,
};

/// The CDS retrieve API authenticates with a personal access token in this header.
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

const POLL_INTERVAL_GROWTH: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout for each API call. Downloads are not bounded by this.
    pub timeout: Duration,
    pub first_poll_interval: Duration,
    pub max_poll_interval: Duration,

    /// Delete the job on the archive once its file has been saved.
    pub delete_finished_jobs: bool,
    pub show_progress: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            first_poll_interval: Duration::from_secs(1),
            max_poll_interval: Duration::from_secs(120),
            delete_finished_jobs: true,
            show_progress: true,
        }
    }
}

pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
    options: ClientOptions,
}

impl Client {
    pub fn new(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            credentials,
            options,
        })
    }

    /// Build a client from `CDSAPI_URL`/`CDSAPI_KEY` or the rc file.
    pub fn from_env(options: ClientOptions) -> Result<Self> {
        Self::new(Credentials::load()?, options)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.credentials.url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/retrieve/v1/{path}"))?)
    }

    fn job_endpoint(&self, job_id: &str) -> Result<Url> {
        self.endpoint(&format!("jobs/{job_id}"))
    }

    pub async fn submit(&self, dataset: &str, request: &Request) -> Result<Job> {
        let url = self.endpoint(&format!("processes/{dataset}/execution"))?;
        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, &self.credentials.key)
            .timeout(self.options.timeout)
            .json(&Execution { inputs: request })
            .send()
            .await?;
        let job: Job = error_for_status(response).await?.json().await?;
        info!(job_id = %job.job_id, dataset, status = %job.status, "Submitted request");
        Ok(job)
    }

    pub async fn status(&self, job_id: &str) -> Result<Job> {
        let response = self
            .http
            .get(self.job_endpoint(job_id)?)
            .header(TOKEN_HEADER, &self.credentials.key)
            .timeout(self.options.timeout)
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// Poll until the job reaches a terminal state.
    ///
    /// The poll interval starts at `first_poll_interval` and grows by 50% per poll
    /// up to `max_poll_interval`.
    pub async fn wait(&self, job: &Job) -> Result<()> {
        let job_id = job.job_id.as_str();
        let mut status = job.status;
        let mut interval = self.options.first_poll_interval;
        while !status.is_terminal() {
            debug!(job_id, %status, interval_secs = interval.as_secs_f64(), "Waiting for job");
            tokio::time::sleep(interval).await;
            interval = interval
                .mul_f64(POLL_INTERVAL_GROWTH)
                .min(self.options.max_poll_interval);
            let latest = self.status(job_id).await?.status;
            if latest != status {
                info!(job_id, status = %latest, "Job status changed");
            }
            status = latest;
        }
        match status {
            JobStatus::Successful => Ok(()),
            status => Err(Error::JobFailed {
                job_id: job_id.to_string(),
                status,
                message: self.failure_reason(job_id).await,
            }),
        }
    }

    /// For an unsuccessful job the results endpoint answers with the reason.
    async fn failure_reason(&self, job_id: &str) -> String {
        let body = async {
            let response = self
                .http
                .get(self.endpoint(&format!("jobs/{job_id}/results"))?)
                .header(TOKEN_HEADER, &self.credentials.key)
                .timeout(self.options.timeout)
                .send()
                .await?;
            Ok::<_, Error>(response.text().await?)
        };
        match body.await {
            Ok(body) => describe_error_body(&body),
            Err(e) => format!("<failed to fetch the reason: {e}>"),
        }
    }

    pub async fn results(&self, job_id: &str) -> Result<AssetValue> {
        let response = self
            .http
            .get(self.endpoint(&format!("jobs/{job_id}/results"))?)
            .header(TOKEN_HEADER, &self.credentials.key)
            .timeout(self.options.timeout)
            .send()
            .await?;
        let results: Results = error_for_status(response).await?.json().await?;
        results
            .asset
            .map(|asset| asset.value)
            .ok_or_else(|| Error::MissingAsset {
                job_id: job_id.to_string(),
            })
    }

    /// Stream the asset to `target`, replacing any existing file.
    ///
    /// Returns the number of bytes written.
    pub async fn download(&self, asset: &AssetValue, target: &Path) -> Result<u64> {
        // `href` is usually absolute; `join` also copes with a relative one.
        let url = self.credentials.url.join(&asset.href)?;
        let response = error_for_status(self.http.get(url).send().await?).await?;
        let progress = self.progress_bar(asset.size.or(response.content_length()), target);

        let mut file = tokio::fs::File::create(target)
            .await
            .map_err(|e| Error::io(target, e))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io(target, e))?;
            written += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }
        file.flush().await.map_err(|e| Error::io(target, e))?;
        progress.finish_and_clear();

        match asset.size {
            Some(expected) if expected != written => Err(Error::SizeMismatch {
                path: target.to_path_buf(),
                expected,
                actual: written,
            }),
            _ => Ok(written),
        }
    }

    /// Remove a finished job from the archive. Never fails the retrieval.
    pub async fn delete(&self, job_id: &str) {
        let result = async {
            let response = self
                .http
                .delete(self.job_endpoint(job_id)?)
                .header(TOKEN_HEADER, &self.credentials.key)
                .timeout(self.options.timeout)
                .send()
                .await?;
            error_for_status(response).await.map(|_| ())
        };
        match result.await {
            Ok(()) => debug!(job_id, "Deleted job"),
            Err(e) => warn!(job_id, error = %e, "Failed to delete job"),
        }
    }

    fn progress_bar(&self, total_bytes: Option<u64>, target: &Path) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }
        let (bar, template) = match total_bytes {
            Some(n) => (
                ProgressBar::new(n),
                "{msg} [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec}, eta {eta})",
            ),
            None => (ProgressBar::new_spinner(), "{msg} {spinner} {bytes} ({bytes_per_sec})"),
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.with_style(style).with_message(name)
    }
}

impl Retrieve for Client {
    async fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> Result<()> {
        let job = self.submit(dataset, request).await?;
        self.wait(&job).await?;
        let asset = self.results(&job.job_id).await?;
        let bytes = self.download(&asset, target).await?;
        info!(job_id = %job.job_id, path = %target.display(), bytes, "Saved");
        if self.options.delete_finished_jobs {
            self.delete(&job.job_id).await;
        }
        Ok(())
    }
}

async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.text().await {
        Ok(body) => describe_error_body(&body),
        Err(e) => format!("<failed to read body: {e}>"),
    };
    Err(Error::Api { status, message })
}
