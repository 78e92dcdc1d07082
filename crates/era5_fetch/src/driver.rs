use std::path::PathBuf;

use anyhow::Context;
use cds_client::Retrieve;
use tracing::info;

use crate::{
    config::FetchConfig,
    plan::{FetchPlan, FetchTask},
};

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Files written, in download order.
    pub files: Vec<PathBuf>,
}

/// Download every (year, variable) file of `config`, one request at a time.
///
/// Years ascend in the outer loop; variables follow catalog order in the inner
/// loop. The first failed retrieval ends the run and is returned with the
/// year, variable and target attached. Existing files are overwritten.
pub async fn run<R: Retrieve>(retriever: &R, config: &FetchConfig) -> anyhow::Result<RunSummary> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create output directory {:?}", config.output_dir))?;

    info!(
        dataset = %config.dataset,
        requests = FetchPlan::new(config).len(),
        first_year = config.years.start(),
        last_year = config.years.end(),
        output_dir = %config.output_dir.display(),
        "Starting download"
    );

    let mut summary = RunSummary::default();
    for year in config.years.iter() {
        info!(year, "Year");
        for variable in config.variables.iter() {
            info!(year, variable = %variable.name, short_code = %variable.short_code, "Variable");
            let task = FetchTask::new(config, year, variable);
            retriever
                .retrieve(&config.dataset, &task.request(config), &task.target)
                .await
                .with_context(|| {
                    format!(
                        "Failed to retrieve {} for {year} into {:?}",
                        variable.name, task.target
                    )
                })?;
            summary.files.push(task.target);
        }
    }
    Ok(summary)
}
