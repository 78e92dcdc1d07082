//! Where to find the CDS API endpoint and personal access token.
//!
//! Environment variables win over the rc file:
//! - `CDSAPI_URL`, `CDSAPI_KEY`
//! - `CDSAPI_RC`: path of the rc file (default `$HOME/.cdsapirc`)
//!
//! The rc file holds `name: value` lines, e.g.
//! ```text
//! url: https://cds.climate.copernicus.eu/api
//! key: <personal-access-token>
//! ```

use std::{
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

const RC_FILE_NAME: &str = ".cdsapirc";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: Url,
    pub key: String,
}

// Keep the token out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(url: Url, key: impl Into<String>) -> Self {
        Self {
            url,
            key: key.into(),
        }
    }

    /// Resolve credentials from the environment and the rc file.
    pub fn load() -> Result<Self> {
        Self::resolve(
            non_empty_env("CDSAPI_URL"),
            non_empty_env("CDSAPI_KEY"),
            &rc_path(),
        )
    }

    fn resolve(env_url: Option<String>, env_key: Option<String>, rc_path: &Path) -> Result<Self> {
        let rc = if env_url.is_some() && env_key.is_some() {
            RcFile::default()
        } else {
            RcFile::read(rc_path)?
        };
        let url = env_url.or(rc.url).ok_or_else(|| Error::MissingCredentials {
            field: "url",
            rc_path: rc_path.to_path_buf(),
        })?;
        let key = env_key.or(rc.key).ok_or_else(|| Error::MissingCredentials {
            field: "key",
            rc_path: rc_path.to_path_buf(),
        })?;
        Ok(Self::new(Url::parse(&url)?, key))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn rc_path() -> PathBuf {
    if let Some(path) = non_empty_env("CDSAPI_RC") {
        return PathBuf::from(path);
    }
    match non_empty_env("HOME").or_else(|| non_empty_env("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(RC_FILE_NAME),
        None => PathBuf::from(RC_FILE_NAME),
    }
}

#[derive(Debug, Default, PartialEq)]
struct RcFile {
    url: Option<String>,
    key: Option<String>,
}

impl RcFile {
    /// A missing file is the same as an empty one.
    fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let mut rc = Self::default();
        for (i, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, value)) = line.split_once(':') else {
                debug!(rc_path = %path.display(), line = i + 1, "Skipping rc line without ':'");
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.trim() {
                "url" => rc.url = Some(value.to_string()),
                "key" => rc.key = Some(value.to_string()),
                _ => (), // e.g. `verify: 0`, which only the Python client understands.
            }
        }
        Ok(rc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const RC: &str = "\
# personal CDS credentials
url: https://cds.climate.copernicus.eu/api
key: 00000000-1111-2222-3333-444444444444

verify: 0
";

    #[test]
    fn test_parse_rc() -> anyhow::Result<()> {
        let rc = RcFile::parse(RC, Path::new("rc"))?;
        assert_eq!(
            rc,
            RcFile {
                url: Some("https://cds.climate.copernicus.eu/api".to_string()),
                key: Some("00000000-1111-2222-3333-444444444444".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parse_legacy_uid_key() -> anyhow::Result<()> {
        // Only the first colon separates name from value.
        let rc = RcFile::parse("key: 12345:abcdef", Path::new("rc"))?;
        assert_eq!(rc.key.as_deref(), Some("12345:abcdef"));
        Ok(())
    }

    #[test]
    fn test_parse_rc_skips_lines_without_colon() -> anyhow::Result<()> {
        let rc = RcFile::parse("url: https://x/api\nkey: abc\nverify 0\n", Path::new("rc"))?;
        assert_eq!(
            rc,
            RcFile {
                url: Some("https://x/api".to_string()),
                key: Some("abc".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn test_resolve_env_overrides_rc() -> anyhow::Result<()> {
        let mut rc_file = tempfile::NamedTempFile::new()?;
        rc_file.write_all(RC.as_bytes())?;

        let creds = Credentials::resolve(None, Some("env-token".to_string()), rc_file.path())?;
        assert_eq!(creds.url.as_str(), "https://cds.climate.copernicus.eu/api");
        assert_eq!(creds.key, "env-token");

        let creds = Credentials::resolve(
            Some("http://localhost:8080/api".to_string()),
            None,
            rc_file.path(),
        )?;
        assert_eq!(creds.url.as_str(), "http://localhost:8080/api");
        assert_eq!(creds.key, "00000000-1111-2222-3333-444444444444");
        Ok(())
    }

    #[test]
    fn test_resolve_missing_rc() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".cdsapirc");
        let err = Credentials::resolve(None, None, &missing).unwrap_err();
        assert!(
            matches!(err, Error::MissingCredentials { field: "url", .. }),
            "{err}"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new(Url::parse("https://example.com/api").unwrap(), "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }
}
