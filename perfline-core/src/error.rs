use thiserror::Error;

/// Unified error type for perfline.
#[derive(Error, Debug)]
pub enum PerflineError {
    #[error("Config error: {0}")]
    Config(#[from] figment::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
