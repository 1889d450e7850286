use thiserror::Error;

/// Fatal errors raised while constructing a [`crate::Comparator`].
///
/// Both variants only ever surface from [`crate::Comparator::new`] or
/// [`crate::Comparator::from_dir`]; `compare` never returns an `Err`.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference data file {path} could not be read or parsed: {source}")]
    ReferenceDataMissing {
        path: String,
        #[source]
        source: ReferenceDataSource,
    },

    #[error("invalid rewrite rule in {table}: {reason}")]
    InvalidRule { table: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ReferenceDataSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
