//! Pure scene description: what to paint for a given session state, as a
//! flat list of canvas commands in paint order.

use std::collections::HashSet;

use super::camera::Camera;
use super::interaction::node_radius;
use super::types::{Bounds, Graph, Node, NodeKind, Point, anchor_index};

pub const GRID_SIZE: f64 = 40.0;
const LABEL_GAP: f64 = 6.0;
pub const LABEL_COLOR: &str = "#d8e8ff";
pub const LABEL_FONT: &str = "12px \"Inter\", \"PingFang SC\", sans-serif";
const EDGE_COLOR: &str = "rgba(255,255,255,0.2)";
const EDGE_ACTIVE_COLOR: &str = "rgba(0, 242, 255, 0.45)";
const GRID_COLOR: &str = "rgba(0, 242, 255, 0.06)";
const BACKDROP: &str = "rgba(5, 14, 24, 0.7)";
pub const GLOW_COLOR: &str = "rgba(0, 242, 255, 0.8)";
pub const GLOW_BLUR: f64 = 22.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeTheme {
	pub fill: &'static str,
	pub stroke: &'static str,
}

pub fn theme_for(kind: &NodeKind) -> NodeTheme {
	let (fill, stroke) = match kind {
		NodeKind::Core => ("rgba(0, 242, 255, 0.35)", "rgba(0, 242, 255, 0.9)"),
		NodeKind::Summary => ("rgba(24, 144, 255, 0.25)", "rgba(24, 144, 255, 0.9)"),
		NodeKind::Meta => ("rgba(111, 255, 233, 0.15)", "rgba(111, 255, 233, 0.7)"),
		NodeKind::Metric => ("rgba(255, 169, 64, 0.2)", "rgba(255, 169, 64, 0.8)"),
		NodeKind::Tag => ("rgba(138, 115, 255, 0.2)", "rgba(138, 115, 255, 0.75)"),
		NodeKind::Hub => ("rgba(255, 255, 255, 0.08)", "rgba(255, 255, 255, 0.45)"),
		NodeKind::Status => ("rgba(255, 99, 125, 0.2)", "rgba(255, 99, 125, 0.85)"),
		NodeKind::Insight => ("rgba(0, 0, 0, 0.35)", "rgba(0, 242, 255, 0.4)"),
		NodeKind::Other(_) => ("rgba(255,255,255,0.2)", "rgba(255,255,255,0.6)"),
	};
	NodeTheme { fill, stroke }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Color(&'static str),
	LinearGradient {
		from: Point,
		to: Point,
		stops: Vec<(f64, &'static str)>,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	Save,
	Restore,
	Scale(f64),
	Translate(Point),
	Clear(Bounds),
	FillRect {
		size: Bounds,
		paint: Paint,
	},
	/// Many segments stroked as one path.
	Lines {
		segments: Vec<(Point, Point)>,
		color: &'static str,
		width: f64,
	},
	Circle {
		center: Point,
		radius: f64,
		theme: NodeTheme,
		line_width: f64,
		glow: bool,
	},
	Label {
		text: String,
		at: Point,
	},
}

/// Everything a frame needs; borrowed from the session.
pub struct SceneInput<'a> {
	pub graph: &'a Graph,
	pub nodes: &'a [Node],
	pub camera: &'a Camera,
	pub active: Option<&'a str>,
	pub viewport: Bounds,
	pub device_pixel_ratio: f64,
}

/// Builds the frame: DPR scale, backdrop, then grid, star edges to the
/// anchor, nodes and labels under the camera transform. Coordinates after
/// the DPR scale are CSS pixels.
pub fn build_scene(input: &SceneInput<'_>) -> Vec<DrawCommand> {
	let viewport = input.viewport;
	if viewport.is_empty() {
		return Vec::new();
	}
	let dpr = if input.device_pixel_ratio > 0.0 {
		input.device_pixel_ratio
	} else {
		1.0
	};
	let camera = input.camera;

	let mut commands = vec![
		DrawCommand::Save,
		DrawCommand::Scale(dpr),
		DrawCommand::Clear(viewport),
		DrawCommand::FillRect {
			size: viewport,
			paint: Paint::Color(BACKDROP),
		},
		DrawCommand::FillRect {
			size: viewport,
			paint: Paint::LinearGradient {
				from: Point::default(),
				to: Point::new(viewport.width, viewport.height),
				stops: vec![(0.0, "rgba(0, 242, 255, 0.05)"), (1.0, "rgba(24, 144, 255, 0.03)")],
			},
		},
		DrawCommand::Save,
		DrawCommand::Translate(camera.offset()),
		DrawCommand::Scale(camera.scale),
	];

	commands.push(DrawCommand::Lines {
		segments: grid_segments(camera, viewport),
		color: GRID_COLOR,
		width: 1.0 / camera.scale,
	});

	let lit = lit_nodes(input);
	if let Some(anchor) = anchor_index(input.nodes) {
		let hub = input.nodes[anchor].position();
		let (plain, bright): (Vec<_>, Vec<_>) = input
			.nodes
			.iter()
			.enumerate()
			.filter(|&(i, _)| i != anchor)
			.partition(|(_, node)| !lit.contains(node.id.as_str()));
		let star = |edges: Vec<(usize, &Node)>| -> Vec<(Point, Point)> {
			edges.into_iter().map(|(_, node)| (node.position(), hub)).collect()
		};
		commands.push(DrawCommand::Lines {
			segments: star(plain),
			color: EDGE_COLOR,
			width: 1.5,
		});
		if !bright.is_empty() {
			commands.push(DrawCommand::Lines {
				segments: star(bright),
				color: EDGE_ACTIVE_COLOR,
				width: 1.5,
			});
		}
	}

	for node in input.nodes {
		let radius = node_radius(node);
		let is_active = input.active == Some(node.id.as_str());
		let line_width = if is_active {
			3.0
		} else if lit.contains(node.id.as_str()) {
			2.5
		} else {
			2.0
		};
		commands.push(DrawCommand::Circle {
			center: node.position(),
			radius,
			theme: theme_for(&node.kind),
			line_width,
			glow: is_active,
		});
		commands.push(DrawCommand::Label {
			text: node.label.clone(),
			at: Point::new(node.x, node.y + radius + LABEL_GAP),
		});
	}

	commands.push(DrawCommand::Restore);
	commands.push(DrawCommand::Restore);
	commands
}

/// The active node's logical neighbours, through edges that resolve.
fn lit_nodes<'a>(input: &SceneInput<'a>) -> HashSet<&'a str> {
	match input.active {
		Some(active) => input.graph.neighbors(active).into_iter().collect(),
		None => HashSet::new(),
	}
}

/// World-space grid lines covering the viewport under `camera`, snapped to
/// the grid and overshooting by one cell.
pub fn grid_segments(camera: &Camera, viewport: Bounds) -> Vec<(Point, Point)> {
	let (min, max) = camera.visible_world(viewport);
	let mut segments = Vec::new();

	let mut x = (min.x / GRID_SIZE).floor() * GRID_SIZE;
	while x < max.x + GRID_SIZE {
		segments.push((Point::new(x, min.y), Point::new(x, max.y)));
		x += GRID_SIZE;
	}
	let mut y = (min.y / GRID_SIZE).floor() * GRID_SIZE;
	while y < max.y + GRID_SIZE {
		segments.push((Point::new(min.x, y), Point::new(max.x, y)));
		y += GRID_SIZE;
	}
	segments
}
