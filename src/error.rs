use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("candles with duplicated label: {0}")]
    DuplicateLabel(String),

    #[error("cannot resolve asset {asset} against host {host:?}")]
    AssetResolution { asset: String, host: String },

    #[error("failed to write chart: {0}")]
    Sink(#[from] io::Error),

    #[error("failed to encode chart options: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render page: {0}")]
    Template(#[from] minijinja::Error),

    #[error("malformed callback in chart options: {0}")]
    InvalidCallback(String),
}

pub type Result<T> = std::result::Result<T, Error>;
