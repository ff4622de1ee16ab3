use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Query failed to run by returning code of {status}. {query}")]
    Request { status: u16, query: String },

    #[error("GitHub API request failed")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned errors: {0}")]
    GraphQl(String),

    #[error("No project #{number} found for user {login}")]
    ProjectNotFound { login: String, number: u32 },

    #[error("Missing `{0}` in GitHub response")]
    MissingData(&'static str),

    /// The `settings` JSON of a choice field could not be parsed.
    #[error("Invalid settings for field {field}")]
    Settings {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid token file {path}: {reason}")]
    Credentials { path: String, reason: String },
}

impl BoardError {
    /// HTTP status of a rejected request, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            BoardError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
