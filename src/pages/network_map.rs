use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::force_graph::ForceGraphCanvas;
use crate::config::LoaderConfig;
use crate::topology::{HttpSource, Topology, load_and_publish};

/// Full-screen map of the collected network.
///
/// Fetches the topology once on mount; until that succeeds the graph stays empty.
#[component]
pub fn NetworkMap(#[prop(optional, into)] endpoint: Option<String>) -> impl IntoView {
	let topology = RwSignal::new(Topology::default());
	let source = HttpSource::new(&LoaderConfig::with_endpoint(endpoint));

	spawn_local(async move {
		load_and_publish(&source, |t| topology.set(t)).await;
	});

	let summary = move || {
		topology.with(|t| format!("{} devices, {} links", t.nodes.len(), t.links.len()))
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=topology fullscreen=true />
				<div class="graph-overlay">
					<h1>"Network Mapper"</h1>
					<p class="subtitle">{summary}</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
