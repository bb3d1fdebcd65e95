use std::f64::consts::PI;

use serde::Deserialize;

use super::types::NodeKind;

/// Tunables for graph building, layout and zoom. Defaults reproduce the
/// console's stock behaviour; any field may be overridden from JSON.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Thresholds for insight nodes.
	pub insights: InsightRules,
	/// Keywords deciding the status node.
	pub status: StatusKeywords,
	/// Ring radii and phases for layout.
	pub rings: RingLayout,
	/// Wheel zoom response and limits.
	pub zoom: ZoomSettings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InsightRules {
	/// At or above this many seconds a clip counts as long-form.
	pub long_form_seconds: f64,
	/// Below this many seconds (and above zero) a clip counts as short.
	pub short_clip_seconds: f64,
	pub multi_tag_count: usize,
}

impl Default for InsightRules {
	fn default() -> Self {
		Self {
			long_form_seconds: 300.0,
			short_clip_seconds: 60.0,
			multi_tag_count: 4,
		}
	}
}

/// Lower-case substrings matched against tags to derive the status node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusKeywords {
	pub fire: Vec<String>,
	pub safety: Vec<String>,
}

impl Default for StatusKeywords {
	fn default() -> Self {
		let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
		Self {
			fire: words(&["fire", "smoke", "火", "烟"]),
			safety: words(&["safety", "alert", "安全", "告警"]),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Ring {
	pub kinds: Vec<NodeKind>,
	/// Radius as a fraction of the canvas' shortest side.
	pub ratio: f64,
	pub min_radius: f64,
	/// Angle of the first node on the ring, in radians.
	pub phase: f64,
}

impl Ring {
	pub fn new(kinds: &[NodeKind], ratio: f64, min_radius: f64, phase: f64) -> Self {
		Self {
			kinds: kinds.to_vec(),
			ratio,
			min_radius,
			phase,
		}
	}

	pub fn radius(&self, shortest_side: f64) -> f64 {
		(shortest_side * self.ratio).max(self.min_radius)
	}
}

/// Concentric rings, innermost first, plus the circle for kinds no ring
/// claims.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingLayout {
	pub rings: Vec<Ring>,
	pub fallback: Ring,
}

impl Default for RingLayout {
	fn default() -> Self {
		use NodeKind::*;
		Self {
			rings: vec![
				Ring::new(&[Summary, Status], 0.15, 50.0, 0.0),
				Ring::new(&[Meta, Metric], 0.22, 80.0, PI / 6.0),
				Ring::new(&[Hub], 0.28, 100.0, PI / 4.0),
				Ring::new(&[Tag, Insight], 0.35, 130.0, PI / 3.0),
			],
			fallback: Ring::new(&[], 0.25, 90.0, 0.0),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
	/// Exponent applied per wheel notch.
	pub intensity: f64,
	pub min_scale: f64,
	pub max_scale: f64,
}

impl Default for ZoomSettings {
	fn default() -> Self {
		Self {
			intensity: 0.1,
			min_scale: 0.1,
			max_scale: 5.0,
		}
	}
}
