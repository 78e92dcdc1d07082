#![doc = include_str!("../README.md")]

pub mod area;
pub mod config;
pub mod driver;
pub mod plan;
pub mod variable;
pub mod years;

pub use crate::area::BoundingBox;
pub use crate::config::{DataFormat, FetchConfig};
pub use crate::driver::{run, RunSummary};
pub use crate::plan::{file_name, FetchPlan, FetchTask};
pub use crate::variable::{ShortCode, Variable, VariableCatalog};
pub use crate::years::YearRange;
