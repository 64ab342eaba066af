//! Error types for the vectorization pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that fail a whole batch run.
///
/// Degenerate input (no documents, an empty vocabulary, zero-norm vectors) is
/// not represented here: those runs succeed with empty or zero results.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input record lacks a required field.
    #[error("event #{index} is missing required field `{field}`")]
    MissingField {
        /// Position of the record in the input batch.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// An input record has a field of the wrong shape.
    #[error("event #{index} has invalid field `{field}`: {reason}")]
    InvalidField {
        /// Position of the record in the input batch.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration value `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the option.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The input batch is not valid JSON or not shaped like an event batch.
    #[error("failed to parse event batch: {source}")]
    ParseJson {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A TOML configuration file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The model snapshot could not be encoded or decoded.
    #[error("model snapshot codec error: {source}")]
    ModelSnapshot {
        /// Underlying CBOR error.
        #[from]
        source: serde_cbor::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
