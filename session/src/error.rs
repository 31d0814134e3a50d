use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] cuelock_store::StoreError),

    #[error("credential codec error: {0}")]
    Codec(#[from] cuelock_crypto::CodecError),

    #[error("codec key error: {0}")]
    Key(#[from] cuelock_crypto::KeyError),

    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] cuelock_types::VocabularyError),

    #[error("invalid username: {0}")]
    Username(#[from] cuelock_types::InvalidUsername),

    #[error("config error: {0}")]
    Config(String),
}
