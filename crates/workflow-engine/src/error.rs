//! Error types for the workflow engine binary.
//!
//! [`AppError`] is the top-level error type that wraps every failure mode
//! during startup, the run, and export.

/// Top-level error for the workflow engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: workflow_core::config::ConfigError,
    },

    /// The engine rejected the run parameters.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: workflow_core::engine::EngineError,
    },

    /// A step failed during the run.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: workflow_core::runner::RunnerError,
    },

    /// Writing results failed.
    #[error("export error: {source}")]
    Export {
        /// The underlying export error.
        #[from]
        source: workflow_core::recorder::ExportError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
