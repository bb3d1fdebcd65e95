use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent};

use super::config::GraphConfig;
use super::interaction::{Effect as GraphEffect, PointerInput, PointerPhase};
use super::render;
use super::state::GraphSession;
use super::tooltip::place_tooltip;
use super::types::{Bounds, Point, VideoMeta};
use crate::error::GraphError;

const FULLSCREEN_SETTLE_MS: i32 = 100;

#[derive(Clone, Debug, PartialEq)]
struct TooltipView {
	label: String,
	detail: String,
	left: f64,
	top: f64,
}

/// DOM handles the session's effects are applied to.
#[derive(Clone, Copy)]
struct Surface {
	container: NodeRef<leptos::html::Div>,
	canvas: NodeRef<leptos::html::Canvas>,
	set_tooltip: WriteSignal<Option<TooltipView>>,
}

impl Surface {
	fn canvas(&self) -> Result<HtmlCanvasElement, GraphError> {
		self.canvas.get_untracked().ok_or(GraphError::NoCanvas)
	}

	fn bounds(&self) -> Bounds {
		self.container
			.get_untracked()
			.map(|container| {
				let rect = container.get_bounding_client_rect();
				Bounds::new(rect.width(), rect.height())
			})
			.unwrap_or_default()
	}

	/// Pointer position relative to the canvas' top-left corner.
	fn local_point(&self, ev: &MouseEvent) -> Option<Point> {
		let rect = self.canvas.get_untracked()?.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	}

	/// Where the canvas sits inside its container.
	fn canvas_offset(&self) -> Point {
		let (Some(container), Some(canvas)) =
			(self.container.get_untracked(), self.canvas.get_untracked())
		else {
			return Point::default();
		};
		let (outer, inner) = (
			container.get_bounding_client_rect(),
			canvas.get_bounding_client_rect(),
		);
		Point::new(inner.left() - outer.left(), inner.top() - outer.top())
	}

	fn apply(&self, session: &GraphSession, effects: Vec<GraphEffect>) {
		for effect in effects {
			match effect {
				GraphEffect::Render => self.draw(session),
				GraphEffect::HideTooltip => self.set_tooltip.set(None),
				GraphEffect::ShowTooltip(request) => {
					let at = place_tooltip(request.at + self.canvas_offset(), self.bounds());
					self.set_tooltip.set(Some(TooltipView {
						label: request.content.label,
						detail: request.content.detail,
						left: at.x,
						top: at.y,
					}));
				}
				GraphEffect::CapturePointer(id) => {
					if let Ok(canvas) = self.canvas() {
						let _ = canvas.set_pointer_capture(id);
					}
				}
				GraphEffect::ReleasePointer(id) => {
					if let Ok(canvas) = self.canvas() {
						let _ = canvas.release_pointer_capture(id);
					}
				}
			}
		}
	}

	fn draw(&self, session: &GraphSession) {
		if let Err(err) = self.try_draw(session) {
			debug!("graph render skipped: {err}");
		}
	}

	fn try_draw(&self, session: &GraphSession) -> Result<(), GraphError> {
		let window = web_sys::window().ok_or(GraphError::NoWindow)?;
		let canvas = self.canvas()?;
		let ctx = context_2d(&canvas)?;
		let size = session.size();
		let dpr = window.device_pixel_ratio();

		canvas.set_width((size.width * dpr).round() as u32);
		canvas.set_height((size.height * dpr).round() as u32);
		let style = web_sys::HtmlElement::style(&canvas);
		let _ = style.set_property("width", &format!("{}px", size.width));
		let _ = style.set_property("height", &format!("{}px", size.height));

		render::render(&ctx, &session.scene(dpr));
		Ok(())
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GraphError> {
	canvas
		.get_context("2d")
		.map_err(|err| GraphError::Context(format!("{err:?}")))?
		.ok_or_else(|| GraphError::Context("no context returned".into()))?
		.dyn_into()
		.map_err(|_| GraphError::Context("not a CanvasRenderingContext2d".into()))
}

/// Canvas graph of one video's metadata with pan, zoom, node drag and a
/// click tooltip. Rebuilds whenever `video` changes.
#[component]
pub fn VideoGraphCanvas(
	#[prop(into)] video: Signal<Option<VideoMeta>>,
	#[prop(optional)] config: Option<GraphConfig>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (tooltip, set_tooltip) = signal(None::<TooltipView>);
	let (fullscreen, set_fullscreen) = signal(false);
	let surface = Surface {
		container: container_ref,
		canvas: canvas_ref,
		set_tooltip,
	};
	let session = Rc::new(RefCell::new(GraphSession::new(config.unwrap_or_default())));
	let listeners: Rc<RefCell<Vec<Closure<dyn FnMut(Event)>>>> = Rc::new(RefCell::new(Vec::new()));
	let installed = Rc::new(Cell::new(false));

	let session_fx = session.clone();
	Effect::new(move |_| {
		let meta = video.get();
		if canvas_ref.get().is_none() {
			return;
		}
		{
			let mut s = session_fx.borrow_mut();
			s.resize(surface.bounds());
			s.rebuild_graph(meta.as_ref());
		}
		set_tooltip.set(None);
		surface.draw(&session_fx.borrow());

		if !installed.replace(true) {
			match install_listeners(surface, session_fx.clone(), set_fullscreen) {
				Ok(hooks) => listeners.borrow_mut().extend(hooks),
				Err(err) => warn!("graph listeners not installed: {err}"),
			}
		}
	});

	let session_ptr = session.clone();
	let on_pointer = move |phase: PointerPhase| {
		let session = session_ptr.clone();
		move |ev: PointerEvent| {
			let Some(position) = surface.local_point(&ev) else {
				return;
			};
			let input = PointerInput::new(ev.pointer_id(), phase, position);
			let effects = session.borrow_mut().pointer(input);
			surface.apply(&session.borrow(), effects);
		}
	};

	let session_wh = session.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(anchor) = surface.local_point(&ev) else {
			return;
		};
		let effects = session_wh.borrow_mut().wheel(anchor, ev.delta_y());
		surface.apply(&session_wh.borrow(), effects);
	};

	let toggle_fullscreen = move |_: MouseEvent| {
		let (Some(container), Some(document)) = (
			container_ref.get_untracked(),
			web_sys::window().and_then(|w| w.document()),
		) else {
			return;
		};
		if document.fullscreen_element().is_some() {
			document.exit_fullscreen();
		} else if let Err(err) = container.request_fullscreen() {
			warn!("fullscreen request refused: {err:?}");
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="graph-container"
			class=("is-fullscreen", move || fullscreen.get())
		>
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:pointerdown=on_pointer(PointerPhase::Down)
				on:pointermove=on_pointer(PointerPhase::Move)
				on:pointerup=on_pointer(PointerPhase::Up)
				on:pointerleave=on_pointer(PointerPhase::Leave)
				on:pointercancel=on_pointer(PointerPhase::Cancel)
				on:wheel=on_wheel
				style="display: block; touch-action: none; cursor: grab;"
			/>
			<button class="graph-fullscreen-btn" on:click=toggle_fullscreen>
				{move || if fullscreen.get() { "Exit" } else { "Fullscreen" }}
			</button>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="graph-tooltip is-visible"
								style:left=format!("{}px", tip.left)
								style:top=format!("{}px", tip.top)
							>
								<strong>{tip.label}</strong>
								<p>{tip.detail}</p>
							</div>
						}
					})
			}}
		</div>
	}
}

/// Window resize, document-level dismissal and fullscreen transitions.
fn install_listeners(
	surface: Surface,
	session: Rc<RefCell<GraphSession>>,
	set_fullscreen: WriteSignal<bool>,
) -> Result<Vec<Closure<dyn FnMut(Event)>>, GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let document = window.document().ok_or(GraphError::NoWindow)?;

	let session_rs = session.clone();
	let on_resize = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
		let mut s = session_rs.borrow_mut();
		s.resize(surface.bounds());
		surface.draw(&s);
	});

	let session_dm = session.clone();
	let on_document_down = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
		let Ok(canvas) = surface.canvas() else {
			return;
		};
		let inside = ev
			.target()
			.and_then(|target| target.dyn_into::<web_sys::Node>().ok())
			.is_some_and(|node| canvas.contains(Some(&node)));
		if inside {
			return;
		}
		let effects = session_dm.borrow_mut().dismiss();
		surface.apply(&session_dm.borrow(), effects);
	});

	let on_fullscreen = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
		let Some(window) = web_sys::window() else {
			return;
		};
		let is_ours = match (
			window.document().and_then(|d| d.fullscreen_element()),
			surface.container.get_untracked(),
		) {
			(Some(active), Some(container)) => active.is_same_node(Some(&container)),
			_ => false,
		};
		set_fullscreen.set(is_ours);

		let session = session.clone();
		let settle = Closure::once_into_js(move || {
			let mut s = session.borrow_mut();
			s.fullscreen_changed(surface.bounds());
			surface.draw(&s);
		});
		let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			settle.unchecked_ref::<js_sys::Function>(),
			FULLSCREEN_SETTLE_MS,
		);
	});

	let hooks: [(&web_sys::EventTarget, &str, &Closure<dyn FnMut(Event)>); 3] = [
		(&window, "resize", &on_resize),
		(&document, "pointerdown", &on_document_down),
		(&document, "fullscreenchange", &on_fullscreen),
	];
	for (target, name, callback) in hooks {
		target
			.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
			.map_err(|err| GraphError::Listener(format!("{name}: {err:?}")))?;
	}

	Ok(vec![on_resize, on_document_down, on_fullscreen])
}
