use thiserror::Error;

/// Fatal errors of a read or write call.
///
/// Malformed calendar data never produces one of these; it is reported as a
/// [`Warning`](crate::rfc::ical::core::Warning) on the document instead.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported iCalendar version: {0}")]
    InvalidVersion(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
