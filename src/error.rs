use thiserror::Error;

pub type DiaryResult<T> = Result<T, DiaryError>;

#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("invalid timeline rect: length={length}")]
    InvalidViewport { length: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid minimum coverage {value}: {reason}")]
    InvalidMinCoverage { value: f64, reason: &'static str },

    #[error("unknown timeline `{0}`")]
    UnknownTimeline(String),

    #[error("unknown activity id {0}")]
    UnknownActivity(u64),

    #[error("activity store invariant violated: {0}")]
    InvariantViolation(String),
}
