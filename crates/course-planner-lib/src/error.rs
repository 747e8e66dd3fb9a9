//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("bincode error: {0}")]
	Bincode(#[from] bincode::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	#[error("configuration error: {0}")]
	Configuration(#[from] ConfigurationError),
}

/// The caller asked for something the catalog doesn't know about.
/// 
/// Unlike data problems inside the catalog these can't be worked around and are handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	#[error("program `{0}` not found")]
	UnknownProgram(String),
	#[error("college `{0}` not found")]
	UnknownCollege(String),
}
