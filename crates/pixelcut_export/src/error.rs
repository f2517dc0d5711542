use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export range is empty")]
    EmptyRange,

    #[error("no clips in the selected range")]
    NoClips,

    #[error("media processor failed: {0}")]
    Processor(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
