use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Node identifier as sent by the collector: either a JSON string or a JSON number.
///
/// The two kinds never compare equal, so `1` and `"1"` name different nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Numeric identifier.
	Number(Number),
	/// String identifier, usually an IP address.
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Number(n) => write!(f, "{n}"),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for NodeId {
	fn from(value: i64) -> Self {
		NodeId::Number(value.into())
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		NodeId::Text(value.to_owned())
	}
}

/// A network device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Identifier referenced by links.
	pub id: NodeId,
	/// Device type ("router", "switch", "pc", ...). Open-ended.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Display label shown on hover.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Any other attributes the collector attached.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Node {
	/// Node with the given id and device type and no label.
	pub fn new(id: impl Into<NodeId>, kind: &str) -> Self {
		Self {
			id: id.into(),
			kind: Some(kind.to_owned()),
			label: None,
			extra: Map::new(),
		}
	}

	/// Attach a display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// A connection between two nodes, by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
	/// Id of the node the link starts at.
	pub source: NodeId,
	/// Id of the node the link ends at.
	pub target: NodeId,
	/// Any other attributes the collector attached.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Link {
	/// Link between two node ids.
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			extra: Map::new(),
		}
	}
}

/// Nodes plus the links between them, in document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
	/// All devices.
	pub nodes: Vec<Node>,
	/// All connections.
	pub links: Vec<Link>,
}

impl Topology {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_collector_document() {
		let doc = r#"{
			"nodes": [
				{ "id": "10.0.0.2", "label": "10.0.0.2", "type": "pc" },
				{ "id": "10.0.0.1", "label": "10.0.0.1", "type": "router", "vendor": "acme" },
				{ "id": 7 }
			],
			"links": [ { "source": "10.0.0.2", "target": "10.0.0.1", "weight": 3 } ]
		}"#;
		let topo: Topology = serde_json::from_str(doc).unwrap();

		assert_eq!(topo.nodes.len(), 3);
		assert_eq!(topo.nodes[0].kind.as_deref(), Some("pc"));
		assert_eq!(topo.nodes[1].extra.get("vendor"), Some(&Value::from("acme")));
		assert_eq!(topo.nodes[2].id, NodeId::from(7_i64));
		assert_eq!(topo.nodes[2].kind, None);
		assert_eq!(topo.nodes[2].label, None);
		assert_eq!(topo.links[0].source, NodeId::from("10.0.0.2"));
		assert_eq!(topo.links[0].extra.get("weight"), Some(&Value::from(3)));
	}

	#[test]
	fn test_numeric_and_string_ids_differ() {
		let num: NodeId = serde_json::from_str("1").unwrap();
		let text: NodeId = serde_json::from_str("\"1\"").unwrap();
		assert_ne!(num, text);
		assert_eq!(num.to_string(), text.to_string());
	}

	#[test]
	fn test_missing_links_key_is_rejected() {
		assert!(serde_json::from_str::<Topology>(r#"{ "nodes": [] }"#).is_err());
	}

	#[test]
	fn test_extra_fields_survive_reencoding() {
		let doc = r#"{"nodes":[{"id":1,"type":"switch","rack":"b2"}],"links":[]}"#;
		let topo: Topology = serde_json::from_str(doc).unwrap();
		let encoded = serde_json::to_string(&topo).unwrap();
		let again: Topology = serde_json::from_str(&encoded).unwrap();
		assert_eq!(topo, again);
		assert_eq!(again.nodes[0].extra.get("rack"), Some(&Value::from("b2")));
	}
}
