//! Loader settings.

/// Where the collector serves its aggregated topology.
pub const DEFAULT_TOPOLOGY_ENDPOINT: &str = "http://localhost:5000/api/topology";

/// Settings for fetching the topology document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Absolute URL of the topology endpoint.
	pub endpoint: String,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_TOPOLOGY_ENDPOINT.to_owned(),
		}
	}
}

impl LoaderConfig {
	/// Use `endpoint` if given, the collector default otherwise.
	pub fn with_endpoint(endpoint: Option<String>) -> Self {
		endpoint
			.map(|endpoint| Self { endpoint })
			.unwrap_or_default()
	}
}
