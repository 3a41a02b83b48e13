//! Error types surfaced at algorithm entry points and from branching-scheme
//! I/O callbacks.

use std::path::PathBuf;

/// Everything that can go wrong while validating parameters, running a
/// search, or asking a branching scheme to persist a solution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter failed validation before any node was expanded.
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    /// The branching scheme wrote (or tried to write) a solution certificate
    /// and the underlying I/O failed.
    #[error("failed to write solution certificate to {}: {source}", path.display())]
    CertificateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The branching scheme violated its contract in a way the framework
    /// could detect (e.g. it returned a child after reporting `infertile`).
    #[error("branching scheme contract violation: {0}")]
    SchemeContract(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
