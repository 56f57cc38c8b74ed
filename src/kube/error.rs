#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no object found for uid `{0}`")]
    NotFound(String),
    #[error("metadata lookup for uid `{uid}` failed: {source}")]
    Lookup {
        uid: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to decode object manifest: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
