use thiserror::Error;

/// Errors surfaced by the load pipeline.
///
/// Degenerate geometry and splits that fail to make progress are absorbed by the
/// builders and never show up here.
#[derive(Error, Debug)]
pub enum Error {
    /// No triangles were handed to the bounds or cache builder.
    #[error("no triangles to process")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    /// Bad command-line input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The background loader went away without sending a result.
    #[error("load worker exited without a result")]
    WorkerDisconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
