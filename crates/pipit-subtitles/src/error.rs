use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build probe client: {0}")]
    ProbeClient(#[from] reqwest::Error),

    #[error("Invalid caption source: {0}")]
    CaptionSource(#[from] pipit_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
