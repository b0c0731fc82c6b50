use std::collections::HashSet;

use super::model::{NodeId, Topology};

/// Drop every link whose `source` or `target` names a node that is not in the topology.
///
/// Nodes pass through untouched, isolated ones included, and retained links keep their order.
/// Dangling links are expected noise from the collector and are discarded without a report.
pub fn sanitize(topology: Topology) -> Topology {
	let Topology { nodes, links } = topology;
	let known: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
	let links = links
		.into_iter()
		.filter(|l| known.contains(&l.source) && known.contains(&l.target))
		.collect();
	Topology { nodes, links }
}
