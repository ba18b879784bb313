use thiserror::Error;

/// Failures raised while inspecting a candidate file.
///
/// None of these reach the caller of [`crate::detect_file`] or
/// [`crate::document_timestamp`]: both degrade every variant to their
/// "no information" value. They exist so the helpers underneath can use `?`
/// and so the reason can be logged.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    #[error("Timestamp {seconds} is outside the accepted range")]
    OutOfRange { seconds: i64 },
}

impl From<zip::result::ZipError> for CoreError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::MalformedContainer(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for CoreError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedContainer(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
