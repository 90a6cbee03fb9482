use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(
        "scenario '{scenario}' needs {needed} unclaimed {kind} IDs but only {available} \
         are available; shrink the scenario or grow the base population"
    )]
    PoolExhausted {
        scenario: &'static str,
        kind: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("resource error: {0}")]
    Resource(String),

    #[error("i/o error on table '{table}' batch {batch}: {source}")]
    TableIo {
        table: String,
        batch: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("integrity error: {0}")]
    Integrity(String),

    #[error("row serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Process exit code for the CLI. Categories are distinguishable so a
    /// wrapper script can tell a bad flag from a full disk.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::Config(_) | GenError::PoolExhausted { .. } => 2,
            GenError::Resource(_) => 3,
            GenError::TableIo { .. } | GenError::Io(_) | GenError::Csv(_) | GenError::Json(_) => 4,
            GenError::Integrity(_) => 5,
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
