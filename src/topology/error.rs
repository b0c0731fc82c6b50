use thiserror::Error;

/// Failures while obtaining a topology document.
#[derive(Debug, Error)]
pub enum TopologyError {
	/// The request never produced a usable response (transport error or non-success status).
	#[error("failed to fetch topology: {0}")]
	Fetch(String),

	/// The response body was not a valid topology document.
	#[error("malformed topology document: {0}")]
	Parse(#[from] serde_json::Error),
}
