//! Error types for the rendering pipeline

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a source file into an image
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be read
    #[error("Error while reading input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lexer gave up part way through the text
    #[error("Error during tokenisation: {0}")]
    Tokenize(String),

    /// The canvas would not fit in memory
    #[error("Generated image would be too large ({width} x {height})")]
    CanvasTooLarge { width: u32, height: u32 },

    /// The image could not be encoded or written
    #[error("Error while writing generated image to {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
