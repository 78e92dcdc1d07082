use std::path::PathBuf;

use crate::job::JobStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, derive_more::Display)]
pub enum Error {
    #[display("No CDS API {field} found. Set CDSAPI_URL and CDSAPI_KEY or create {rc_path:?}")]
    MissingCredentials {
        field: &'static str,
        rc_path: PathBuf,
    },

    #[display("HTTP request failed: {_0}")]
    Http(#[from] reqwest::Error),

    #[display("CDS API returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[display("CDS job {job_id} ended with status '{status}': {message}")]
    JobFailed {
        job_id: String,
        status: JobStatus,
        message: String,
    },

    #[display("CDS job {job_id} finished but its results contain no downloadable asset")]
    MissingAsset { job_id: String },

    #[display("Downloaded {actual} bytes to {path:?} but the archive announced {expected} bytes")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[display("I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[display("Invalid URL: {_0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
