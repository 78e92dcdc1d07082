//! Wire types for the job resources of the CDS retrieve API.
//!
//! A submission creates a job. The job moves through `accepted` and `running` and
//! ends in one of the terminal states. Only a `successful` job has results.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[display("accepted")]
    Accepted,
    #[display("running")]
    Running,
    #[display("successful")]
    Successful,
    #[display("failed")]
    Failed,
    #[display("rejected")]
    Rejected,
    #[display("dismissed")]
    Dismissed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Accepted | Self::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    #[serde(rename = "jobID")]
    pub job_id: String,
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Results {
    pub(crate) asset: Option<Asset>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Asset {
    pub(crate) value: AssetValue,
}

/// The downloadable file produced by a successful job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetValue {
    pub href: String,

    /// Size in bytes, when the archive announces it.
    #[serde(rename = "file:size")]
    pub size: Option<u64>,
}

/// Error bodies follow RFC 7807 ("problem details").
#[derive(Debug, Default, Deserialize)]
struct ProblemDetails {
    title: Option<String>,
    detail: Option<String>,
}

/// Turn an error response body into a one-line message.
pub(crate) fn describe_error_body(body: &str) -> String {
    if let Ok(problem) = serde_json::from_str::<ProblemDetails>(body) {
        match (problem.title, problem.detail) {
            (Some(title), Some(detail)) => return format!("{title}: {detail}"),
            (Some(msg), None) | (None, Some(msg)) => return msg,
            (None, None) => (),
        }
    }
    let body = body.trim();
    if body.is_empty() {
        "<empty response body>".to_string()
    } else {
        body.to_string()
    }
}
