/// Error returned when a survey document cannot be read at all.
///
/// Problems inside a well-formed document are not errors; they are reported
/// as [`BuildDefect`](crate::BuildDefect)s.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("Invalid survey document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Survey document must be an object, found {found}")]
    NotAnObject { found: &'static str },
}
