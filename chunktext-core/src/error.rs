use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkTextError {
    #[error("Open error: {0}")]
    Open(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("chunk size must be a positive number of bytes")]
    InvalidChunkSize,

    #[error("source file is empty, nothing to split")]
    EmptySource,

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Directory listing error: {0}")]
    ReadDir(String),

    #[error("no chunk files found in {0}")]
    EmptyInput(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Output create error: {0}")]
    OutputCreate(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Missing chunk: {0}")]
    MissingChunk(String),
}

pub type Result<T> = std::result::Result<T, ChunkTextError>;
