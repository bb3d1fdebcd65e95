use super::config::ZoomSettings;
use super::types::{Bounds, Point};

/// World-to-screen transform: translate by `(x, y)` after scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			scale: 1.0,
		}
	}
}

/// Snapshot taken when a pan starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanGesture {
	pub start_screen: Point,
	pub start_camera: Point,
}

impl Camera {
	pub fn offset(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn world_to_screen(&self, p: Point) -> Point {
		p * self.scale + self.offset()
	}

	pub fn screen_to_world(&self, p: Point) -> Point {
		(p - self.offset()) / self.scale
	}

	pub fn begin_pan(&self, start_screen: Point) -> PanGesture {
		PanGesture {
			start_screen,
			start_camera: self.offset(),
		}
	}

	/// Moves the camera by the screen distance travelled since the gesture
	/// began. Scale is untouched.
	pub fn pan_to(&mut self, gesture: &PanGesture, current: Point) {
		let offset = gesture.start_camera + (current - gesture.start_screen);
		self.x = offset.x;
		self.y = offset.y;
	}

	/// Zooms around `anchor` (screen space) so the world point under it
	/// stays put. Negative `delta_y` zooms in.
	pub fn zoom_at(&mut self, anchor: Point, delta_y: f64, zoom: &ZoomSettings) {
		if delta_y == 0.0 || !delta_y.is_finite() {
			return;
		}
		let world = self.screen_to_world(anchor);
		let factor = (-delta_y.signum() * zoom.intensity).exp();
		let scale = (self.scale * factor).max(zoom.min_scale).min(zoom.max_scale);
		let offset = anchor - world * scale;
		self.x = offset.x;
		self.y = offset.y;
		self.scale = scale;
	}

	pub fn reset(&mut self) {
		*self = Camera::default();
	}

	/// World-space rectangle covered by a viewport, as (top-left,
	/// bottom-right).
	pub fn visible_world(&self, viewport: Bounds) -> (Point, Point) {
		(
			self.screen_to_world(Point::new(0.0, 0.0)),
			self.screen_to_world(Point::new(viewport.width, viewport.height)),
		)
	}
}
