use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarcutError {
    #[error("data directory does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("feed parse error: {0}")]
    FeedParse(String),

    #[error("invalid cutpoint year: {0}")]
    InvalidYear(String),

    #[error("unknown measure key: {0}")]
    UnknownMeasure(String),

    #[error("no performance data for entity: {0}")]
    UnknownEntity(String),

    #[error("rating out of range for {measure_key}: {rating} (expected 1..=5)")]
    RatingOutOfRange { measure_key: String, rating: u8 },

    #[error("invalid weight for {measure_key}: {weight}")]
    InvalidWeight { measure_key: String, weight: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StarcutError>;
