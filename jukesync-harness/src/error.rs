use thiserror::Error;

/// Errors raised by the test fixtures.
///
/// Note the asymmetry in the renderer: failing to launch the renderer
/// process is an error (fatal to the calling test), while a renderer that
/// launched but exited non-zero is only logged.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The renderer process could not be launched at all.
    #[error("Failed to launch renderer {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The options bag could not be serialized to JSON.
    #[error("Failed to encode render options: {0}")]
    Options(#[from] serde_json::Error),

    /// A fragment or stylesheet could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
