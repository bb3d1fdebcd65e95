use super::types::{Bounds, Node, Point};

const OFFSET: f64 = 14.0;
const MARGIN: f64 = 12.0;
const FAR_EDGE_MARGIN: f64 = 20.0;

/// What the tooltip sink displays for a selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	pub label: String,
	pub detail: String,
}

impl TooltipContent {
	pub fn for_node(node: &Node) -> Self {
		let detail = if node.detail.trim().is_empty() {
			"No description".to_string()
		} else {
			node.detail.clone()
		};
		Self {
			label: node.label.clone(),
			detail,
		}
	}
}

/// Tooltip top-left inside its container, offset from the release point
/// and kept off the container edges.
pub fn place_tooltip(release: Point, container: Bounds) -> Point {
	let clamp = |value: f64, far: f64| value.max(MARGIN).min(far - FAR_EDGE_MARGIN);
	Point::new(
		clamp(release.x + OFFSET, container.width),
		clamp(release.y + OFFSET, container.height),
	)
}
