use log::debug;

use super::builder::build_graph;
use super::camera::Camera;
use super::config::GraphConfig;
use super::interaction::{Effect, Interaction, PointerInput, PointerTarget};
use super::layout::{layout_nodes, rescale_to_canvas};
use super::scene::{DrawCommand, SceneInput, build_scene};
use super::types::{Bounds, Graph, Node, Point, VideoMeta};

/// Everything the graph panel knows for the current video: the logical
/// graph, its positioned nodes, camera, selection, canvas size and the
/// gesture in flight. All mutation goes through these methods.
pub struct GraphSession {
	config: GraphConfig,
	graph: Graph,
	nodes: Vec<Node>,
	camera: Camera,
	active: Option<String>,
	interaction: Interaction,
	size: Bounds,
}

impl GraphSession {
	/// Starts on the empty-state graph, unsized.
	pub fn new(config: GraphConfig) -> Self {
		let graph = build_graph(None, &config);
		Self {
			config,
			graph,
			nodes: Vec::new(),
			camera: Camera::default(),
			active: None,
			interaction: Interaction::Idle,
			size: Bounds::default(),
		}
	}

	/// Logical graph of the current video.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Positioned nodes; empty until the canvas has a size.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Current camera, for read-only consumers such as a minimap.
	pub fn camera(&self) -> Camera {
		self.camera
	}

	/// Canvas size the positions were laid out for.
	pub fn size(&self) -> Bounds {
		self.size
	}

	/// Gesture currently in flight.
	pub fn interaction(&self) -> &Interaction {
		&self.interaction
	}

	/// Selected node, if any.
	pub fn active_node(&self) -> Option<&Node> {
		let id = self.active.as_deref()?;
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Replaces the graph for a new (or refreshed) video. Selection, the
	/// camera and any gesture are discarded.
	pub fn rebuild_graph(&mut self, meta: Option<&VideoMeta>) {
		self.graph = build_graph(meta, &self.config);
		self.active = None;
		self.interaction = Interaction::Idle;
		self.camera.reset();
		self.nodes = if self.size.is_empty() {
			Vec::new()
		} else {
			layout_nodes(&self.graph, self.size, &self.config.rings)
		};
		debug!(
			"graph rebuilt for {}: {} nodes, {} edges",
			meta.map(|m| m.id.as_str()).unwrap_or("<none>"),
			self.graph.nodes.len(),
			self.graph.edges.len()
		);
	}

	/// Replaces the camera, clamping its scale to the zoom limits.
	pub fn set_camera(&mut self, camera: Camera) {
		let zoom = &self.config.zoom;
		let scale = if camera.scale.is_finite() {
			camera.scale.max(zoom.min_scale).min(zoom.max_scale)
		} else {
			1.0
		};
		self.camera = Camera { scale, ..camera };
	}

	/// Selects `id`, or clears the selection with `None`. Unknown ids are
	/// rejected and leave the selection as it was.
	pub fn set_active_node(&mut self, id: Option<&str>) -> bool {
		match id {
			None => {
				self.active = None;
				true
			}
			Some(id) if self.graph.node(id).is_some() => {
				self.active = Some(id.to_string());
				true
			}
			Some(_) => false,
		}
	}

	/// Adopts a new canvas size. The first real size lays the graph out;
	/// later ones stretch the existing positions.
	pub fn resize(&mut self, bounds: Bounds) {
		if bounds.is_empty() {
			return;
		}
		if self.nodes.is_empty() {
			self.nodes = layout_nodes(&self.graph, bounds, &self.config.rings);
		} else if self.size != bounds {
			rescale_to_canvas(&mut self.nodes, self.size, bounds);
		}
		if self.size != bounds {
			debug!("graph canvas resized to {}x{}", bounds.width, bounds.height);
		}
		self.size = bounds;
	}

	/// Fullscreen entered or left: the view starts over at the default
	/// camera in the new size.
	pub fn fullscreen_changed(&mut self, bounds: Bounds) {
		self.camera.reset();
		self.resize(bounds);
	}

	/// Feeds one canvas pointer event through the interaction machine.
	pub fn pointer(&mut self, input: PointerInput) -> Vec<Effect> {
		if self.nodes.is_empty() {
			return Vec::new();
		}
		self.interaction.handle(
			input,
			PointerTarget {
				nodes: &mut self.nodes,
				camera: &mut self.camera,
				active: &mut self.active,
			},
		)
	}

	/// Zooms around `anchor`; nothing to redraw when already at a limit.
	pub fn wheel(&mut self, anchor: Point, delta_y: f64) -> Vec<Effect> {
		let before = self.camera;
		self.camera.zoom_at(anchor, delta_y, &self.config.zoom);
		if self.camera == before {
			Vec::new()
		} else {
			vec![Effect::Render]
		}
	}

	/// A press landed outside the canvas. A pan in flight belongs to
	/// another pointer and keeps running.
	pub fn dismiss(&mut self) -> Vec<Effect> {
		self.active = None;
		if !self.interaction.is_panning() {
			self.interaction = Interaction::Idle;
		}
		vec![Effect::HideTooltip, Effect::Render]
	}

	/// Paint commands for the current frame.
	pub fn scene(&self, device_pixel_ratio: f64) -> Vec<DrawCommand> {
		build_scene(&SceneInput {
			graph: &self.graph,
			nodes: &self.nodes,
			camera: &self.camera,
			active: self.active.as_deref(),
			viewport: self.size,
			device_pixel_ratio,
		})
	}
}
