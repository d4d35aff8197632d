use thiserror::Error;

/// Failure taxonomy for the data layer. Every variant is surfaced to the user
/// as a status message; none of them ends the session.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read or is not parseable tabular text.
    #[error("failed to load dataset: {0}")]
    Load(String),

    /// The cleaning pipeline hit something unexpected. The session keeps the
    /// previous table because cleaning builds a new one and swaps on success.
    #[error("data cleaning failed: {0}")]
    Clean(String),

    /// A malformed filter bound (e.g. a non-numeric year). Recovered locally
    /// by dropping that predicate.
    #[error("invalid filter bound {0:?}: expected a year")]
    Filter(String),

    /// An analysis was requested for a column the table does not have.
    #[error("required column '{0}' is not available")]
    Analysis(String),
}
