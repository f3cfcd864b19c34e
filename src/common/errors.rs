use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Document encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Store is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid object path '{0}'")]
    InvalidPath(String),

    #[error("Object '{0}' already exists")]
    AlreadyExists(String),

    #[error("Object storage is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    Missing(&'static str),

    #[error("Field '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Upload exceeds the limit of {0} bytes")]
    TooLarge(usize),
}

/// Failure of a flow that writes one document, possibly after an upload.
/// Callers only distinguish it from a fetch failure, never by cause.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Upload(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing error: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::Hashing(e)
    }
}
