use thiserror::Error;

use super::update::UpdateError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error("config error: {0}")]
    Config(String),
}

impl CliError {
    // 0: success
    // 1: model missing / not searchable
    // 2: unsupported search engine
    // 11: config error
    // 20: remote update call failed
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Update(e) => e.exit_code(),
            Self::Config(_) => 11,
        }
    }
}
