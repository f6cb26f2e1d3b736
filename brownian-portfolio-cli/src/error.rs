use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-level errors, each mapped to a distinct process exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("engine configuration error: {0}")]
    Config(#[from] brownian_portfolio::ConfigError),

    #[error("failed to open input: {0}")]
    InputOpen(std::io::Error),

    #[error("I/O error while reading or writing records: {0}")]
    Io(#[from] std::io::Error),

    /// Reserved for interface parity with the exit-code contract; no code
    /// path here constructs it (see `exit_code`'s doc comment).
    #[allow(dead_code)]
    #[error("allocation failed: {0}")]
    AllocationFailure(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Maps this error onto the process exit status. `4` (allocation
    /// failure) is reserved for interface parity but unreachable: Rust's
    /// global allocator aborts the process on OOM rather than returning a
    /// `Result` any code path here could construct.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 1,
            CliError::Config(_) => 1,
            CliError::InputOpen(_) => 2,
            CliError::Io(_) => 3,
            CliError::AllocationFailure(_) => 4,
            CliError::Other(_) => 5,
        }
    }
}
