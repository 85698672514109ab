use thiserror::Error;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("Invalid arguments, more details: {0}")]
    InvalidArguments(String),
    #[error("The trip description is not valid JSON for a trip, more details: {0}")]
    InvalidTrip(#[from] serde_json::Error),
    #[error("Failed to render the result, more details: {0}")]
    Render(serde_json::Error),
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn invalid_arguments(error: &clap::Error) -> Self {
        Self::InvalidArguments(error.to_string().trim_end().to_owned())
    }
}
