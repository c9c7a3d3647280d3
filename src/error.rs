use thiserror::Error;

/// Errors raised while indexing, matching or configuring the panel.
#[derive(Error, Debug)]
pub enum TypeBlockError {
    /// No label or canonical type could be derived for a block.
    #[error("Unable to parse label for block '{block_id}' (type '{block_type}')")]
    UnparseableBlock { block_id: String, block_type: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TypeBlockError>;
