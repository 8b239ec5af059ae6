use thiserror::Error;

/// Failures surfaced by document-store implementations. The console's load
/// and save paths flatten these into the narrow `None`/`false` contract;
/// the error text only feeds notifications and logs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not reach section document: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse section document: {0}")]
    Parse(String),
    #[error("could not serialize section document: {0}")]
    Serialize(String),
}
