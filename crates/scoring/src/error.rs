use advisor_backend_catalog::CatalogError;
use advisor_store::{Collection, StoreError};
use thiserror::Error;

/// Failure while scoring one advice.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Reference store error: {0}")]
    Store(#[from] StoreError),

    #[error("Training catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid row in {collection}: {message}")]
    Decode {
        collection: Collection,
        message: String,
    },
}

/// A model identifier that cannot be turned into a model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Malformed model identifier: {0:?}")]
    MalformedIdentifier(String),

    #[error("Invalid argument {argument:?} for model {name:?}")]
    InvalidArgument { name: String, argument: String },

    #[error("Constant score {0} is out of range [0, 3]")]
    ScoreOutOfRange(i32),
}
