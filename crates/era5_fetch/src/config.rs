use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    area::BoundingBox,
    variable::VariableCatalog,
    years::{YearRange, YearRangeError},
};

/// Everything one run needs, loaded from a YAML file.
///
/// Only `output_dir`, `years` and `area` are required. See
/// `config/horn_of_africa.yaml` for a complete example.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,

    #[serde(default = "default_product_type")]
    pub product_type: String,

    #[serde(default)]
    pub data_format: DataFormat,

    /// First part of every file name: `<prefix>_<short code>_<year>.<ext>`.
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// Relative paths are relative to the current working directory.
    pub output_dir: PathBuf,

    pub years: YearRange,

    pub area: BoundingBox,

    #[serde(default)]
    pub variables: VariableCatalog,
}

fn default_dataset() -> String {
    "reanalysis-era5-single-levels".to_string()
}

fn default_product_type() -> String {
    "reanalysis".to_string()
}

fn default_filename_prefix() -> String {
    "ERA5".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Netcdf,
    Grib,
}

impl DataFormat {
    /// The value of the `data_format` request field.
    pub fn as_cds_str(&self) -> &'static str {
        match self {
            Self::Netcdf => "netcdf",
            Self::Grib => "grib",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Netcdf => "nc",
            Self::Grib => "grib",
        }
    }
}

impl FetchConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config file {path:?}"))
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.filename_prefix.is_empty()
            || config.filename_prefix.contains(&['/', '\\'][..])
        {
            anyhow::bail!(
                "filename_prefix '{}' must be non-empty and must not contain path separators",
                config.filename_prefix
            );
        }
        Ok(config)
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Replace either end of the year range. The result is validated again.
    pub fn with_years(
        mut self,
        start: Option<i32>,
        end: Option<i32>,
    ) -> Result<Self, YearRangeError> {
        self.years = YearRange::new(
            start.unwrap_or(self.years.start()),
            end.unwrap_or(self.years.end()),
        )?;
        Ok(self)
    }
}
