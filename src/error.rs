//! Error types shared by the samplers and the status builder.

use std::io;

/// Failures a tick can surface. Absence of an optional device (no
/// battery, no such network interface) is not an error; the samplers
/// model it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Kernel-exposed text did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A file confirmed present could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The external mixer or bar command failed or produced unusable output.
    #[error("external tool error: {0}")]
    ExternalTool(String),
}

pub type Result<T> = std::result::Result<T, Error>;
