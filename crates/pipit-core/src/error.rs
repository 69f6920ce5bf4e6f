use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid caption source: {0}")]
    InvalidCaptionSource(String),
}

pub type Result<T> = std::result::Result<T, Error>;
