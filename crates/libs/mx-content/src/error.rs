use thiserror::Error;

/// Errors raised while decoding message content from its wire mapping.
///
/// Absent optional fields are never an error; only missing required fields
/// and values of the wrong shape are.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("content is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong shape: {reason}")]
    WrongShape { field: String, reason: String },

    #[error("unexpected msgtype '{found}'")]
    UnexpectedMsgType { found: String },

    #[error("invalid JSON: {0}")]
    Json(String),
}

impl DecodeError {
    pub(crate) fn wrong_shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WrongShape { field: field.into(), reason: reason.into() }
    }
}

/// Errors from parsing an RFC 5870 `geo:` URI.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GeoUriError {
    #[error("missing 'geo:' scheme")]
    MissingScheme,

    #[error("missing {0}")]
    MissingComponent(&'static str),

    #[error("invalid {component}: '{value}'")]
    InvalidNumber { component: &'static str, value: String },

    #[error("{component} out of range: {value}")]
    OutOfRange { component: &'static str, value: f64 },

    #[error("too many coordinates")]
    TooManyCoordinates,
}
