/// Canvas background.
pub const BACKGROUND: &str = "#222";

/// Every link is drawn in this color, as an `r, g, b` triple so alpha can vary with highlighting.
pub const LINK_RGB: &str = "255, 255, 255";

/// Color for nodes whose type has no entry in [`NODE_COLORS`].
pub const DEFAULT_NODE_COLOR: &str = "lightblue";

const NODE_COLORS: &[(&str, &str)] = &[("router", "orange"), ("switch", "lightgreen")];

/// Fill color for a node of the given device type.
pub fn node_color(kind: Option<&str>) -> &'static str {
	kind.and_then(|k| NODE_COLORS.iter().find(|(name, _)| *name == k))
		.map(|&(_, color)| color)
		.unwrap_or(DEFAULT_NODE_COLOR)
}
