//! Hit-testing and the pointer state machine.
//!
//! Input arrives as toolkit-neutral [`PointerInput`]s in canvas-local screen
//! coordinates. Each step mutates the camera, node positions and selection
//! it is handed and reports what the host must do as [`Effect`]s.

use super::camera::{Camera, PanGesture};
use super::tooltip::TooltipContent;
use super::types::{Node, NodeKind, Point};

/// Extra screen-independent slack around a node's radius for hits.
pub const HIT_SLOP: f64 = 4.0;
/// Screen distance a pressed node must travel before it is dragged.
pub const DRAG_THRESHOLD: f64 = 3.0;

pub fn node_radius(node: &Node) -> f64 {
	match node.kind {
		NodeKind::Core => 18.0,
		NodeKind::Hub => 15.0,
		NodeKind::Tag => 10.0,
		NodeKind::Insight => 12.0,
		_ if node.fixed => 14.0,
		_ => 12.0,
	}
}

/// Index of the node under `screen`. Nodes are drawn in order, so the scan
/// runs back to front and the topmost (last drawn) node wins overlaps.
pub fn hit_test(nodes: &[Node], camera: &Camera, screen: Point) -> Option<usize> {
	let world = camera.screen_to_world(screen);
	nodes
		.iter()
		.rposition(|node| node.position().distance(world) <= node_radius(node) + HIT_SLOP)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
	Down,
	Move,
	Up,
	Leave,
	Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
	pub pointer_id: i32,
	pub phase: PointerPhase,
	pub position: Point,
}

impl PointerInput {
	pub fn new(pointer_id: i32, phase: PointerPhase, position: Point) -> Self {
		Self {
			pointer_id,
			phase,
			position,
		}
	}
}

/// Where a pressed node was grabbed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGrab {
	pub start_screen: Point,
	pub node_start: Point,
	pub dragging: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	NodeSelected {
		pointer_id: i32,
		node: usize,
		grab: NodeGrab,
	},
	Panning {
		pointer_id: i32,
		gesture: PanGesture,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRequest {
	pub content: TooltipContent,
	/// Release point in canvas-local screen space.
	pub at: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	Render,
	ShowTooltip(TooltipRequest),
	HideTooltip,
	CapturePointer(i32),
	ReleasePointer(i32),
}

/// Mutable view of the session a pointer step may touch.
pub struct PointerTarget<'a> {
	pub nodes: &'a mut [Node],
	pub camera: &'a mut Camera,
	pub active: &'a mut Option<String>,
}

impl Interaction {
	fn owner(&self) -> Option<i32> {
		match *self {
			Interaction::Idle => None,
			Interaction::NodeSelected { pointer_id, .. } | Interaction::Panning { pointer_id, .. } => {
				Some(pointer_id)
			}
		}
	}

	pub fn is_panning(&self) -> bool {
		matches!(self, Interaction::Panning { .. })
	}

	/// Advances the machine by one pointer event. Events from a pointer
	/// other than the one that started the current gesture are ignored.
	pub fn handle(&mut self, input: PointerInput, target: PointerTarget<'_>) -> Vec<Effect> {
		if self.owner().is_some_and(|owner| owner != input.pointer_id) {
			return Vec::new();
		}

		match input.phase {
			PointerPhase::Down => self.press(input, target),
			PointerPhase::Move => self.drag(input, target),
			PointerPhase::Up => self.release(input, target),
			PointerPhase::Leave | PointerPhase::Cancel => self.abort(input),
		}
	}

	fn press(&mut self, input: PointerInput, target: PointerTarget<'_>) -> Vec<Effect> {
		if let Some(index) = hit_test(target.nodes, target.camera, input.position) {
			let node = &target.nodes[index];
			*target.active = Some(node.id.clone());
			*self = Interaction::NodeSelected {
				pointer_id: input.pointer_id,
				node: index,
				grab: NodeGrab {
					start_screen: input.position,
					node_start: node.position(),
					dragging: false,
				},
			};
			return vec![Effect::CapturePointer(input.pointer_id), Effect::Render];
		}

		*target.active = None;
		*self = Interaction::Panning {
			pointer_id: input.pointer_id,
			gesture: target.camera.begin_pan(input.position),
		};
		vec![
			Effect::HideTooltip,
			Effect::CapturePointer(input.pointer_id),
			Effect::Render,
		]
	}

	fn drag(&mut self, input: PointerInput, target: PointerTarget<'_>) -> Vec<Effect> {
		match self {
			Interaction::Panning { gesture, .. } => {
				target.camera.pan_to(gesture, input.position);
				vec![Effect::Render]
			}
			Interaction::NodeSelected { node, grab, .. } => {
				let delta = input.position - grab.start_screen;
				if !grab.dragging && delta.distance(Point::default()) < DRAG_THRESHOLD {
					return Vec::new();
				}
				let Some(node) = target.nodes.get_mut(*node) else {
					return Vec::new();
				};
				node.set_position(grab.node_start + delta / target.camera.scale);
				if grab.dragging {
					vec![Effect::Render]
				} else {
					grab.dragging = true;
					vec![Effect::HideTooltip, Effect::Render]
				}
			}
			Interaction::Idle => Vec::new(),
		}
	}

	fn release(&mut self, input: PointerInput, target: PointerTarget<'_>) -> Vec<Effect> {
		let previous = std::mem::take(self);
		if previous.is_panning() {
			return vec![Effect::ReleasePointer(input.pointer_id)];
		}

		let mut effects = Vec::new();
		if previous.owner().is_some() {
			effects.push(Effect::ReleasePointer(input.pointer_id));
		}
		// a dropped node stays selected even when it lands under another one
		let selected = match previous {
			Interaction::NodeSelected {
				node,
				grab: NodeGrab { dragging: true, .. },
				..
			} if node < target.nodes.len() => Some(node),
			_ => hit_test(target.nodes, target.camera, input.position),
		};
		match selected {
			Some(index) => {
				let node = &target.nodes[index];
				*target.active = Some(node.id.clone());
				effects.push(Effect::ShowTooltip(TooltipRequest {
					content: TooltipContent::for_node(node),
					at: input.position,
				}));
			}
			None => {
				*target.active = None;
				effects.push(Effect::HideTooltip);
			}
		}
		effects.push(Effect::Render);
		effects
	}

	/// Leave and cancel end whatever gesture is in flight without touching
	/// the selection.
	fn abort(&mut self, input: PointerInput) -> Vec<Effect> {
		match std::mem::take(self) {
			Interaction::Idle => Vec::new(),
			Interaction::Panning { .. } => vec![Effect::ReleasePointer(input.pointer_id)],
			Interaction::NodeSelected { .. } => {
				vec![Effect::ReleasePointer(input.pointer_id), Effect::Render]
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node_at(id: &str, kind: NodeKind, x: f64, y: f64) -> Node {
		let mut node = Node::new(id, id.to_uppercase(), kind, format!("about {id}"));
		node.set_position(Point::new(x, y));
		node
	}

	struct Fixture {
		nodes: Vec<Node>,
		camera: Camera,
		active: Option<String>,
		machine: Interaction,
	}

	impl Fixture {
		fn new() -> Self {
			Self {
				nodes: vec![
					node_at("core", NodeKind::Core, 200.0, 200.0),
					node_at("tag", NodeKind::Tag, 300.0, 200.0),
				],
				camera: Camera::default(),
				active: None,
				machine: Interaction::Idle,
			}
		}

		fn send(&mut self, id: i32, phase: PointerPhase, x: f64, y: f64) -> Vec<Effect> {
			self.machine.handle(
				PointerInput::new(id, phase, Point::new(x, y)),
				PointerTarget {
					nodes: &mut self.nodes,
					camera: &mut self.camera,
					active: &mut self.active,
				},
			)
		}
	}

	#[test]
	fn radius_by_kind() {
		assert_eq!(node_radius(&node_at("a", NodeKind::Core, 0.0, 0.0)), 18.0);
		assert_eq!(node_radius(&node_at("a", NodeKind::Hub, 0.0, 0.0)), 15.0);
		assert_eq!(node_radius(&node_at("a", NodeKind::Tag, 0.0, 0.0)), 10.0);
		assert_eq!(node_radius(&node_at("a", NodeKind::Insight, 0.0, 0.0)), 12.0);
		assert_eq!(node_radius(&node_at("a", NodeKind::Meta, 0.0, 0.0)), 12.0);
		assert_eq!(node_radius(&node_at("a", NodeKind::Meta, 0.0, 0.0).pinned()), 14.0);
	}

	#[test]
	fn hit_test_prefers_topmost_node() {
		let nodes = vec![
			node_at("below", NodeKind::Meta, 100.0, 100.0),
			node_at("above", NodeKind::Meta, 110.0, 100.0),
		];
		let camera = Camera::default();
		assert_eq!(hit_test(&nodes, &camera, Point::new(105.0, 100.0)), Some(1));
		assert_eq!(hit_test(&nodes, &camera, Point::new(86.0, 100.0)), Some(0));
		assert_eq!(hit_test(&nodes, &camera, Point::new(83.0, 100.0)), None);
	}

	#[test]
	fn hit_test_goes_through_camera() {
		let nodes = vec![node_at("n", NodeKind::Tag, 50.0, 50.0)];
		let camera = Camera { x: 100.0, y: 0.0, scale: 2.0 };
		assert_eq!(hit_test(&nodes, &camera, Point::new(200.0, 100.0)), Some(0));
		assert_eq!(hit_test(&nodes, &camera, Point::new(50.0, 50.0)), None);
	}

	#[test]
	fn press_on_node_selects_without_tooltip() {
		let mut f = Fixture::new();
		let effects = f.send(1, PointerPhase::Down, 302.0, 201.0);
		assert_eq!(effects, vec![Effect::CapturePointer(1), Effect::Render]);
		assert_eq!(f.active.as_deref(), Some("tag"));
		assert!(matches!(f.machine, Interaction::NodeSelected { node: 1, .. }));

		let effects = f.send(1, PointerPhase::Up, 302.0, 201.0);
		assert_eq!(f.machine, Interaction::Idle);
		assert_eq!(f.active.as_deref(), Some("tag"));
		assert!(effects.contains(&Effect::ShowTooltip(TooltipRequest {
			content: TooltipContent {
				label: "TAG".into(),
				detail: "about tag".into(),
			},
			at: Point::new(302.0, 201.0),
		})));
	}

	#[test]
	fn release_off_node_clears_selection() {
		let mut f = Fixture::new();
		f.active = Some("core".into());
		let effects = f.send(1, PointerPhase::Up, 10.0, 10.0);
		assert_eq!(effects, vec![Effect::HideTooltip, Effect::Render]);
		assert_eq!(f.active, None);
	}

	#[test]
	fn pan_moves_camera_and_ends_on_release() {
		let mut f = Fixture::new();
		f.active = Some("core".into());
		let effects = f.send(7, PointerPhase::Down, 100.0, 100.0);
		assert!(effects.contains(&Effect::HideTooltip));
		assert_eq!(f.active, None);
		assert!(f.machine.is_panning());

		f.send(7, PointerPhase::Move, 150.0, 130.0);
		assert_eq!(f.camera, Camera { x: 50.0, y: 30.0, scale: 1.0 });

		let effects = f.send(7, PointerPhase::Up, 150.0, 130.0);
		assert_eq!(effects, vec![Effect::ReleasePointer(7)]);
		assert_eq!(f.machine, Interaction::Idle);
		assert_eq!(f.active, None);
	}

	#[test]
	fn other_pointers_cannot_steer_or_end_a_pan() {
		let mut f = Fixture::new();
		f.send(1, PointerPhase::Down, 100.0, 100.0);
		assert!(f.send(2, PointerPhase::Move, 400.0, 400.0).is_empty());
		assert!(f.send(2, PointerPhase::Up, 400.0, 400.0).is_empty());
		assert!(f.send(2, PointerPhase::Down, 200.0, 200.0).is_empty());
		assert_eq!(f.camera, Camera::default());
		assert!(f.machine.is_panning());

		f.send(1, PointerPhase::Move, 110.0, 100.0);
		assert_eq!(f.camera.x, 10.0);
	}

	#[test]
	fn leave_and_cancel_end_a_pan() {
		for phase in [PointerPhase::Leave, PointerPhase::Cancel] {
			let mut f = Fixture::new();
			f.send(3, PointerPhase::Down, 100.0, 100.0);
			f.send(3, PointerPhase::Move, 120.0, 100.0);
			assert_eq!(f.send(3, phase, 120.0, 100.0), vec![Effect::ReleasePointer(3)]);
			assert_eq!(f.machine, Interaction::Idle);
			assert!(f.send(3, PointerPhase::Move, 300.0, 300.0).is_empty());
			assert_eq!(f.camera.x, 20.0);
		}
	}

	#[test]
	fn leave_while_idle_is_inert() {
		let mut f = Fixture::new();
		f.active = Some("tag".into());
		assert!(f.send(1, PointerPhase::Leave, 0.0, 0.0).is_empty());
		assert_eq!(f.active.as_deref(), Some("tag"));
	}

	#[test]
	fn dragging_a_node_moves_it_in_world_space() {
		let mut f = Fixture::new();
		f.camera.scale = 2.0;
		// tag at world (300, 200) sits at screen (600, 400)
		f.send(1, PointerPhase::Down, 600.0, 400.0);
		assert!(f.send(1, PointerPhase::Move, 601.0, 401.0).is_empty());
		let effects = f.send(1, PointerPhase::Move, 620.0, 380.0);
		assert_eq!(effects, vec![Effect::HideTooltip, Effect::Render]);
		assert_eq!(f.nodes[1].position(), Point::new(310.0, 190.0));

		f.send(1, PointerPhase::Move, 640.0, 400.0);
		assert_eq!(f.nodes[1].position(), Point::new(320.0, 200.0));

		let effects = f.send(1, PointerPhase::Up, 640.0, 400.0);
		assert_eq!(effects[0], Effect::ReleasePointer(1));
		assert!(matches!(effects[1], Effect::ShowTooltip(_)));
		assert_eq!(f.active.as_deref(), Some("tag"));
		assert_eq!(f.camera, Camera { x: 0.0, y: 0.0, scale: 2.0 });
	}

	#[test]
	fn dropping_under_a_later_node_keeps_the_dragged_one() {
		let mut f = Fixture::new();
		// drag core (drawn first) onto tag (drawn last)
		f.send(1, PointerPhase::Down, 200.0, 200.0);
		f.send(1, PointerPhase::Move, 300.0, 200.0);
		assert_eq!(f.nodes[0].position(), Point::new(300.0, 200.0));

		let effects = f.send(1, PointerPhase::Up, 300.0, 200.0);
		assert_eq!(f.active.as_deref(), Some("core"));
		assert!(effects.iter().any(|e| matches!(
			e,
			Effect::ShowTooltip(TooltipRequest { content, .. }) if content.label == "CORE"
		)));
	}
}
