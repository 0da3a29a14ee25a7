//! Crate-level error type.

use thiserror::Error;

use crate::apply::ApplyError;
use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::store::{
    BundleError,
    StoreError,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    /// The dataset id is not listed in the settings
    #[error("Unknown dataset '{0}'")]
    UnknownDataset(String),
    /// The language is not configured for this operation
    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("Table '{table}' not found in dataset '{dataset}'")]
    UnknownTable { dataset: String, table: String },
    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("Invalid table filter: {0}")]
    Filter(#[from] globset::Error),
    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
