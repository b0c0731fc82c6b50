use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::palette::node_color;
use crate::topology::{NodeId, Topology};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
const LAYOUT_RADIUS: f64 = 100.0;

const HOVER_DELAY: f64 = 0.08;
const FADE_IN: f64 = 1.8;
const FADE_OUT: f64 = 1.26;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: &'static str,
}

/// Screen = graph * k + (x, y).
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// What the pointer is doing between press and release.
#[derive(Clone, Debug, Default)]
enum Gesture {
	#[default]
	Idle,
	Drag {
		node: DefaultNodeIdx,
		from: (f64, f64),
		node_from: (f32, f32),
	},
	Pan {
		from: (f64, f64),
		view_from: (f64, f64),
	},
}

#[derive(Clone, Debug)]
struct Focus {
	node: DefaultNodeIdx,
	neighbors: HashSet<DefaultNodeIdx>,
}

impl Focus {
	fn covers(&self, idx: DefaultNodeIdx) -> bool {
		self.node == idx || self.neighbors.contains(&idx)
	}
}

/// Hovered node and its neighbors, plus the one fading out after the pointer left it.
#[derive(Clone, Debug, Default)]
struct Highlight {
	current: Option<Focus>,
	fading: Option<Focus>,
	level: f64,
	delay: f64,
}

/// Simulation and interaction state for one published topology.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	gesture: Gesture,
	highlight: Highlight,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(topology: &Topology, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx: HashMap<&NodeId, DefaultNodeIdx> = HashMap::new();

		let count = topology.nodes.len().max(1) as f64;
		for (i, node) in topology.nodes.iter().enumerate() {
			// Start on a circle around the origin; the view transform centers it.
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (LAYOUT_RADIUS * angle.cos()) as f32,
				y: (LAYOUT_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: node_color(node.kind.as_deref()),
				},
			});
			id_to_idx.entry(&node.id).or_insert(idx);
		}

		let edges: Vec<_> = topology
			.links
			.iter()
			.filter_map(|link| {
				Some((*id_to_idx.get(&link.source)?, *id_to_idx.get(&link.target)?))
			})
			.collect();
		for &(src, tgt) in &edges {
			graph.add_edge(src, tgt, EdgeData::default());
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			width,
			height,
			gesture: Gesture::Idle,
			highlight: Highlight::default(),
		}
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space radius, so it scales with zoom like the nodes
			if dx.hypot(dy) < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	/// Pointer pressed: grab the node under it, or start panning.
	pub fn press(&mut self, x: f64, y: f64) {
		let grabbed = self
			.node_at_position(x, y)
			.and_then(|idx| Some((idx, self.node_position(idx)?)));
		self.gesture = match grabbed {
			Some((node, node_from)) => Gesture::Drag {
				node,
				from: (x, y),
				node_from,
			},
			None => Gesture::Pan {
				from: (x, y),
				view_from: (self.transform.x, self.transform.y),
			},
		};
	}

	/// Pointer moved: drag pins the grabbed node under the cursor, anything else tracks hover.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		match self.gesture {
			Gesture::Drag {
				node,
				from,
				node_from,
			} => {
				let k = self.transform.k;
				let nx = node_from.0 + ((x - from.0) / k) as f32;
				let ny = node_from.1 + ((y - from.1) / k) as f32;
				self.graph.visit_nodes_mut(|n| {
					if n.index() == node {
						n.data.x = nx;
						n.data.y = ny;
						n.data.is_anchor = true;
					}
				});
			}
			Gesture::Pan { from, view_from } => {
				self.transform.x = view_from.0 + (x - from.0);
				self.transform.y = view_from.1 + (y - from.1);
				self.set_hover(self.node_at_position(x, y));
			}
			Gesture::Idle => self.set_hover(self.node_at_position(x, y)),
		}
	}

	/// Pointer released. Dragged nodes stay pinned where they were dropped.
	pub fn release(&mut self) {
		self.gesture = Gesture::Idle;
	}

	pub fn pointer_left(&mut self) {
		self.gesture = Gesture::Idle;
		self.set_hover(None);
	}

	/// Zoom one wheel step about the cursor, keeping the graph point under it fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		let current = self.highlight.current.as_ref().map(|f| f.node);
		if current == node {
			return;
		}
		let previous = self.highlight.current.take();
		match node {
			Some(idx) => {
				if previous.is_none() {
					self.highlight.delay = 0.0;
				}
				self.highlight.fading = None;
				self.highlight.current = Some(Focus {
					node: idx,
					neighbors: self.neighbors(idx),
				});
			}
			None => self.highlight.fading = previous,
		}
	}

	fn neighbors(&self, idx: DefaultNodeIdx) -> HashSet<DefaultNodeIdx> {
		self.edges
			.iter()
			.filter_map(|&(src, tgt)| match (src == idx, tgt == idx) {
				(true, false) => Some(tgt),
				(false, true) => Some(src),
				_ => None,
			})
			.collect()
	}

	fn focuses(&self) -> impl Iterator<Item = &Focus> {
		self.highlight.current.iter().chain(self.highlight.fading.iter())
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.focuses().any(|f| f.covers(idx))
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.focuses().any(|f| f.node == idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.focuses().next().is_some()
	}

	/// Emphasis of the highlighted nodes, from 0 (none) to 1 (full).
	pub fn highlight_level(&self) -> f64 {
		self.highlight.level
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let dt = dt as f64;
		let h = &mut self.highlight;
		if h.current.is_some() {
			h.delay = (h.delay + dt).min(HOVER_DELAY);
			if h.delay >= HOVER_DELAY {
				h.level += (1.0 - h.level) * FADE_IN * dt;
			}
		} else {
			h.level -= h.level * FADE_OUT * dt;
			if h.level < 0.01 {
				h.level = 0.0;
				h.fading = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		// Keep the graph centered when the viewport changes
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::topology::{Link, Node};

	fn sample() -> Topology {
		Topology {
			nodes: vec![
				Node::new("10.0.0.1", "router").with_label("gw"),
				Node::new("10.0.0.2", "switch").with_label("sw"),
				Node::new("10.0.0.3", "pc").with_label("pc"),
				Node::new("10.0.0.4", "unknown").with_label("lonely"),
			],
			links: vec![
				Link::new("10.0.0.3", "10.0.0.2"),
				Link::new("10.0.0.2", "10.0.0.1"),
				Link::new("10.0.0.3", "10.0.0.99"),
			],
		}
	}

	fn index_of(state: &ForceGraphState, label: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.label.as_deref() == Some(label) {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	fn is_pinned(state: &ForceGraphState, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	fn colors(state: &ForceGraphState) -> HashMap<DefaultNodeIdx, &'static str> {
		let mut out = HashMap::new();
		state.graph.visit_nodes(|node| {
			out.insert(node.index(), node.data.user_data.color);
		});
		out
	}

	#[test]
	fn test_nodes_colored_by_type() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let colors = colors(&state);
		let color_of = |label: &str| colors[&index_of(&state, label)];

		assert_eq!(colors.len(), 4);
		assert_eq!(color_of("gw"), "orange");
		assert_eq!(color_of("sw"), "lightgreen");
		assert_eq!(color_of("pc"), "lightblue");
		assert_eq!(color_of("lonely"), "lightblue");
	}

	#[test]
	fn test_unresolvable_links_get_no_edge() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0);
		assert_eq!(state.edge_count(), 2);
	}

	#[test]
	fn test_hover_highlights_neighbors() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (gw, sw, pc, lonely) = (
			index_of(&state, "gw"),
			index_of(&state, "sw"),
			index_of(&state, "pc"),
			index_of(&state, "lonely"),
		);

		state.set_hover(Some(sw));
		assert!(state.is_hovered(sw));
		assert!(state.is_highlighted(gw));
		assert!(state.is_highlighted(pc));
		assert!(!state.is_highlighted(lonely));

		state.set_hover(None);
		assert!(state.has_active_highlight());
		assert!(state.is_highlighted(pc));

		state.highlight.level = 0.005;
		state.tick(0.016);
		assert!(!state.has_active_highlight());
		assert_eq!(state.highlight_level(), 0.0);
	}

	#[test]
	fn test_highlight_fades_in_after_delay() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.set_hover(Some(index_of(&state, "gw")));
		state.tick(0.05);
		assert_eq!(state.highlight_level(), 0.0);
		state.tick(0.05);
		assert!(state.highlight_level() > 0.0);
	}

	#[test]
	fn test_hit_test_respects_view_transform() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0);
		// First node starts at (LAYOUT_RADIUS, 0) in graph space
		let first = index_of(&state, "gw");
		assert_eq!(state.node_at_position(400.0 + LAYOUT_RADIUS, 300.0), Some(first));
		assert_eq!(state.node_at_position(400.0, 300.0 - LAYOUT_RADIUS + 50.0), None);
	}

	#[test]
	fn test_drag_moves_and_pins_node() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let gw = index_of(&state, "gw");

		state.press(500.0, 300.0);
		state.pointer_moved(520.0, 310.0);
		state.release();
		// Moving after release leaves the node alone
		state.pointer_moved(600.0, 400.0);

		assert_eq!(state.node_position(gw), Some((120.0, 10.0)));
		assert!(is_pinned(&state, gw));
		assert!(!is_pinned(&state, index_of(&state, "sw")));
	}

	#[test]
	fn test_background_press_pans_view() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.press(10.0, 10.0);
		state.pointer_moved(30.0, 50.0);
		assert_eq!((state.transform.x, state.transform.y), (420.0, 340.0));

		state.pointer_left();
		state.pointer_moved(90.0, 90.0);
		assert_eq!((state.transform.x, state.transform.y), (420.0, 340.0));
	}

	#[test]
	fn test_zoom_keeps_cursor_point_fixed() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let before = state.screen_to_graph(520.0, 250.0);
		state.zoom_at(520.0, 250.0, -1.0);
		let after = state.screen_to_graph(520.0, 250.0);

		assert!((state.transform.k - 1.1).abs() < 1e-9);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn test_resize_keeps_graph_centered() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.resize(1000.0, 700.0);
		assert_eq!((state.transform.x, state.transform.y), (500.0, 350.0));
	}

	#[test]
	fn test_empty_topology() {
		let state = ForceGraphState::new(&Topology::default(), 800.0, 600.0);
		assert_eq!(state.edge_count(), 0);
		assert!(colors(&state).is_empty());
	}
}
