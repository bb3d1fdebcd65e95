use std::f64::consts::PI;

use super::config::{Ring, RingLayout};
use super::types::{Bounds, Graph, Node, Point, anchor_index};

/// Positions a copy of the graph's nodes: the anchor at the canvas centre,
/// everything else on concentric rings by kind. Deterministic; no
/// simulation.
pub fn layout_nodes(graph: &Graph, bounds: Bounds, layout: &RingLayout) -> Vec<Node> {
	let mut nodes = graph.nodes.clone();
	let Some(anchor) = anchor_index(&nodes) else {
		return nodes;
	};

	let center = bounds.center();
	let shortest = bounds.shortest_side();
	nodes[anchor].set_position(center);
	nodes[anchor].fixed = true;

	let mut placed = vec![false; nodes.len()];
	placed[anchor] = true;

	for ring in &layout.rings {
		let members: Vec<usize> = (0..nodes.len())
			.filter(|&i| !placed[i] && ring.kinds.contains(&nodes[i].kind))
			.collect();
		place_on_ring(&mut nodes, &members, center, shortest, ring);
		for i in members {
			placed[i] = true;
		}
	}

	let leftovers: Vec<usize> = (0..nodes.len()).filter(|&i| !placed[i]).collect();
	place_on_ring(&mut nodes, &leftovers, center, shortest, &layout.fallback);

	nodes
}

fn place_on_ring(nodes: &mut [Node], members: &[usize], center: Point, shortest: f64, ring: &Ring) {
	let radius = ring.radius(shortest);
	let count = members.len().max(1) as f64;
	for (index, &i) in members.iter().enumerate() {
		let angle = ring.phase + (index as f64 / count) * PI * 2.0;
		nodes[i].set_position(center + Point::new(angle.cos(), angle.sin()) * radius);
	}
}

/// Stretches stored positions from `old` to `new` canvas size per axis,
/// keeping the arrangement without re-running layout.
pub fn rescale_to_canvas(nodes: &mut [Node], old: Bounds, new: Bounds) {
	if old.is_empty() || new.is_empty() {
		return;
	}
	let (sx, sy) = (new.width / old.width, new.height / old.height);
	for node in nodes {
		node.x *= sx;
		node.y *= sy;
	}
}
