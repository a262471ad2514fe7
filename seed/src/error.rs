use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("missing configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("request for agent {id} failed: {source}")]
    Http {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("agent {id}: server answered {status}: {body}")]
    Status { id: String, status: u16, body: String },

    #[error("agent {id} rejected: {message}")]
    Rejected { id: String, message: String },
}

pub type Result<T> = std::result::Result<T, SeedError>;
