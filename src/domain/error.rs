// Domain errors
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PageError {
    #[error("page route must start with '/': {0}")]
    InvalidRoute(String),

    #[error("card '{0}' already exists on this page")]
    DuplicateKey(String),

    #[error("no card named '{0}' on this page")]
    UnknownCard(String),

    #[error("card '{0}' has no data buffer")]
    NoDataBuffer(String),

    #[error("data buffer needs at least one field")]
    EmptyFields,

    #[error("data buffer holds {size} rows, got {rows}")]
    BufferOverflow { size: usize, rows: usize },

    #[error("time series rows need 2 fields, buffer declares {0}")]
    FieldCount(usize),

    #[error("visualization needs at least one mark")]
    EmptyVisualization,

    #[error("mark binds field '{0}' which the data buffer does not declare")]
    UnboundField(String),

    #[error("invalid card box '{0}', expected four positive integers")]
    InvalidBox(String),

    #[error("interval plots need a plot category field")]
    MissingPlotCategory,

    #[error("frame card needs exactly one of path or content")]
    FrameSource,

    #[error("unknown mark kind '{0}'")]
    UnknownMarkKind(String),

    #[error("unknown scale '{0}'")]
    UnknownScale(String),
}
