use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("access token not configured: set the {0} environment variable")]
    AuthMissing(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
