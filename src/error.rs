use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    /// Caller passed something the pipeline cannot work with (bad counts, bad indices, bad sizes).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The geometry backend rejected its input.
    #[error("geometry computation failed: {0}")]
    GeometryComputation(String),
}

pub type HandResult<T> = Result<T, HandError>;

impl HandError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        Self::GeometryComputation(msg.into())
    }
}
