/// Application-level errors
///
/// List-management failures (`AlreadyListed`, `NotFound`) are returned to the
/// caller as values and never cross the presentation boundary as panics.
/// Catalog transport failures inside the recommendation fan-out are absorbed
/// per query; everywhere else they propagate.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Book already listed: {0}")]
    AlreadyListed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog API error: {0}")]
    ExternalApi(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
