use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<JsonStoreError> for cuelock_store::StoreError {
    fn from(e: JsonStoreError) -> Self {
        match e {
            JsonStoreError::Io(e) => cuelock_store::StoreError::Backend(e.to_string()),
            JsonStoreError::Serialization(e) => {
                cuelock_store::StoreError::Serialization(e.to_string())
            }
        }
    }
}
