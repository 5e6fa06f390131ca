use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the generator crate.
pub type GenResult<T> = Result<T, GenError>;

/// Fatal conditions raised while turning the header pair into wrapper code.
///
/// Every variant aborts the run before any output is produced.
#[derive(Debug, Error)]
pub enum GenError {
    /// Reading one of the header sources failed.
    #[error("failed to read header: {0}")]
    Io(#[from] std::io::Error),

    /// A scanned statement does not match the grammar it was collected for.
    #[error("malformed {grammar} declaration: '{statement}'")]
    MalformedDeclaration {
        grammar: &'static str,
        statement: String,
    },

    /// A parsed function has no slot in its function list layout.
    #[error("function '{function}' is missing from the {table} layout")]
    MissingOrderEntry {
        function: String,
        table: &'static str,
    },

    /// Plain and extended declarations disagree on the parameter count.
    #[error(
        "function '{function}' has {plain} plain argument(s) but {extended} extended argument(s); expected exactly one extra receiver"
    )]
    ArityMismatch {
        function: String,
        plain: usize,
        extended: usize,
    },

    /// A generator config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generator config document is not valid YAML for `GeneratorConfig`.
    #[error("invalid generator config: {0}")]
    Config(#[from] serde_yml::Error),
}
