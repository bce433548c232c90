use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Entry not found: {0}")]
    EntryNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ClipError>;
