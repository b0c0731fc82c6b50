use log::{error, info};
use reqwest::StatusCode;

use super::error::TopologyError;
use super::model::Topology;
use super::sanitize::sanitize;
use crate::config::LoaderConfig;

/// Anything that can hand back the raw body of a topology document.
#[allow(async_fn_in_trait)]
pub trait TopologySource {
	/// Retrieve the document body. This is the loader's only suspension point.
	async fn fetch(&self) -> Result<String, TopologyError>;
}

/// Fetches the document with a plain HTTP GET.
#[derive(Clone, Debug)]
pub struct HttpSource {
	endpoint: String,
	client: reqwest::Client,
}

impl HttpSource {
	/// Source reading from the endpoint in `config`.
	pub fn new(config: &LoaderConfig) -> Self {
		Self {
			endpoint: config.endpoint.clone(),
			client: reqwest::Client::new(),
		}
	}

	/// The URL this source requests.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

impl TopologySource for HttpSource {
	async fn fetch(&self) -> Result<String, TopologyError> {
		let resp = self
			.client
			.get(&self.endpoint)
			.send()
			.await
			.map_err(|e| {
				TopologyError::Fetch(format!("request to {} failed: {e}", self.endpoint))
			})?;

		ensure_success(&self.endpoint, resp.status())?;
		resp.text().await.map_err(|e| {
			TopologyError::Fetch(format!("reading body from {} failed: {e}", self.endpoint))
		})
	}
}

/// Anything outside 2xx counts as a failed fetch.
fn ensure_success(endpoint: &str, status: StatusCode) -> Result<(), TopologyError> {
	if status.is_success() {
		return Ok(());
	}
	Err(TopologyError::Fetch(format!(
		"{endpoint} answered with status {status}"
	)))
}

/// Decode a topology document.
pub fn parse(body: &str) -> Result<Topology, TopologyError> {
	Ok(serde_json::from_str(body)?)
}

/// Fetch, decode and sanitize one topology document.
pub async fn load<S: TopologySource>(source: &S) -> Result<Topology, TopologyError> {
	let body = source.fetch().await?;
	let raw = parse(&body)?;
	Ok(sanitize(raw))
}

/// Run [`load`] once and hand the result to `publish`.
///
/// On failure the error is logged and `publish` is never called, so whatever the caller was
/// showing before stays in place.
pub async fn load_and_publish<S, F>(source: &S, publish: F)
where
	S: TopologySource,
	F: FnOnce(Topology),
{
	match load(source).await {
		Ok(topology) => {
			info!(
				"Loaded topology: {} nodes, {} links",
				topology.nodes.len(),
				topology.links.len()
			);
			publish(topology);
		}
		Err(e) => error!("{e}"),
	}
}
