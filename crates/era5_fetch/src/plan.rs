//! The years × variables matrix of one run, in download order.

use std::path::PathBuf;

use cds_client::Request;

use crate::{
    config::{DataFormat, FetchConfig},
    variable::{ShortCode, Variable},
};

/// `<prefix>_<short code>_<YYYY>.<ext>`, e.g. `ERA5_t2m_2001.nc`.
pub fn file_name(prefix: &str, short_code: &ShortCode, year: i32, format: DataFormat) -> String {
    format!("{prefix}_{short_code}_{year:04}.{}", format.extension())
}

/// One (year, variable) cell of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTask<'a> {
    pub year: i32,
    pub variable: &'a Variable,
    pub target: PathBuf,
}

impl<'a> FetchTask<'a> {
    pub fn new(config: &FetchConfig, year: i32, variable: &'a Variable) -> Self {
        let target = config.output_dir.join(file_name(
            &config.filename_prefix,
            &variable.short_code,
            year,
            config.data_format,
        ));
        Self {
            year,
            variable,
            target,
        }
    }

    /// A whole year of hourly fields for this variable over the configured area.
    pub fn request(&self, config: &FetchConfig) -> Request {
        Request {
            product_type: vec![config.product_type.clone()],
            variable: vec![self.variable.name.clone()],
            year: vec![self.year.to_string()],
            month: (1..=12).map(|m| format!("{m:02}")).collect(),
            day: (1..=31).map(|d| format!("{d:02}")).collect(),
            time: (0..24).map(|h| format!("{h:02}:00")).collect(),
            area: Some(config.area.to_area()),
            data_format: config.data_format.as_cds_str().to_string(),
            ..Default::default()
        }
    }
}

pub struct FetchPlan<'a> {
    config: &'a FetchConfig,
}

impl<'a> FetchPlan<'a> {
    pub fn new(config: &'a FetchConfig) -> Self {
        Self { config }
    }

    /// Years ascending in the outer loop, variables in catalog order in the inner loop.
    pub fn tasks(&self) -> impl Iterator<Item = FetchTask<'a>> + 'a {
        let config = self.config;
        config.years.iter().flat_map(move |year| {
            config
                .variables
                .iter()
                .map(move |variable| FetchTask::new(config, year, variable))
        })
    }

    pub fn len(&self) -> usize {
        self.config.years.count() * self.config.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
