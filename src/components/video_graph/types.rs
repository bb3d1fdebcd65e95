use std::ops::{Add, Div, Mul, Sub};

use serde::Deserialize;

/// Semantic category of a node; drives ring placement, radius and theme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
	Core,
	Summary,
	Meta,
	Metric,
	Tag,
	Hub,
	Status,
	Insight,
	Other(String),
}

impl From<&str> for NodeKind {
	fn from(value: &str) -> Self {
		match value {
			"core" => NodeKind::Core,
			"summary" => NodeKind::Summary,
			"meta" => NodeKind::Meta,
			"metric" => NodeKind::Metric,
			"tag" => NodeKind::Tag,
			"hub" => NodeKind::Hub,
			"status" => NodeKind::Status,
			"insight" => NodeKind::Insight,
			other => NodeKind::Other(other.to_owned()),
		}
	}
}

impl From<String> for NodeKind {
	fn from(value: String) -> Self {
		NodeKind::from(value.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub detail: String,
	pub fixed: bool,
	/// Node an insight hangs off; only set for insight nodes.
	pub anchor: Option<String>,
	/// World-space position, assigned by layout and drag.
	pub x: f64,
	pub y: f64,
}

impl Node {
	pub fn new(
		id: impl Into<String>,
		label: impl Into<String>,
		kind: NodeKind,
		detail: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind,
			detail: detail.into(),
			fixed: false,
			anchor: None,
			x: 0.0,
			y: 0.0,
		}
	}

	pub fn pinned(mut self) -> Self {
		self.fixed = true;
		self
	}

	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn set_position(&mut self, p: Point) {
		self.x = p.x;
		self.y = p.y;
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	Highlight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: String,
	pub to: String,
	pub kind: Option<EdgeKind>,
}

impl Edge {
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			kind: None,
		}
	}

	pub fn highlight(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			kind: Some(EdgeKind::Highlight),
			..Self::new(from, to)
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl Graph {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Edges whose endpoints both exist, as node index pairs. Dangling
	/// edges are dropped without complaint.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize, &Edge)> + '_ {
		self.edges.iter().filter_map(|edge| {
			let from = self.nodes.iter().position(|node| node.id == edge.from)?;
			let to = self.nodes.iter().position(|node| node.id == edge.to)?;
			Some((from, to, edge))
		})
	}

	/// Ids of nodes sharing a resolvable edge with `id`.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		self.resolved_edges()
			.filter_map(|(_, _, edge)| {
				if edge.from == id {
					Some(edge.to.as_str())
				} else if edge.to == id {
					Some(edge.from.as_str())
				} else {
					None
				}
			})
			.collect()
	}
}

/// Index of the node everything else is arranged around: the first fixed
/// node, else the first node.
pub fn anchor_index(nodes: &[Node]) -> Option<usize> {
	nodes
		.iter()
		.position(|node| node.fixed)
		.or_else(|| (!nodes.is_empty()).then_some(0))
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, rhs: f64) -> Point {
		Point::new(self.x / rhs, self.y / rhs)
	}
}

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn shortest_side(&self) -> f64 {
		self.width.min(self.height)
	}
}

/// Metadata of one library video, as stored in the manifest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoMeta {
	/// Library id, unique within the manifest.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Media location relative to the console root.
	pub src: String,
	/// Free-form labels, in upload order.
	pub tags: Vec<String>,
	/// Operator-written summary; may be blank.
	pub summary: String,
	/// Length in seconds once media metadata has loaded.
	pub duration_seconds: Option<f64>,
	/// Pre-rendered duration label, preferred over `duration_seconds`.
	pub duration_formatted: Option<String>,
	/// RFC 3339 upload timestamp.
	pub uploaded_at: Option<String>,
}

impl VideoMeta {
	/// Duration in seconds, zero when unknown or not a real number.
	pub fn duration(&self) -> f64 {
		match self.duration_seconds {
			Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
			_ => 0.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph() -> Graph {
		Graph {
			nodes: vec![
				Node::new("a", "A", NodeKind::Core, ""),
				Node::new("b", "B", NodeKind::Tag, ""),
			],
			edges: vec![Edge::new("a", "b"), Edge::new("a", "ghost")],
		}
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let graph = graph();
		let resolved: Vec<_> = graph.resolved_edges().map(|(f, t, _)| (f, t)).collect();
		assert_eq!(resolved, vec![(0, 1)]);
		assert_eq!(graph.neighbors("a"), vec!["b"]);
	}

	#[test]
	fn anchor_is_first_fixed_else_first_node() {
		let mut nodes = vec![
			Node::new("x", "X", NodeKind::Summary, ""),
			Node::new("y", "Y", NodeKind::Core, ""),
			Node::new("z", "Z", NodeKind::Tag, ""),
		];
		// a core node later in the list does not take over
		assert_eq!(anchor_index(&nodes), Some(0));
		nodes[2].fixed = true;
		assert_eq!(anchor_index(&nodes), Some(2));
		assert_eq!(anchor_index(&[]), None);
	}

	#[test]
	fn unknown_kind_round_trips_through_other() {
		assert_eq!(NodeKind::from("cluster"), NodeKind::Other("cluster".into()));
		assert_eq!(NodeKind::from("hub"), NodeKind::Hub);
	}

	#[test]
	fn bounds_with_zero_side_are_empty() {
		assert!(Bounds::new(0.0, 200.0).is_empty());
		assert!(Bounds::default().is_empty());
		assert!(!Bounds::new(10.0, 10.0).is_empty());
	}
}
