//! Turns one video's metadata into the node/edge graph shown on the canvas.

use chrono::DateTime;

use super::config::{GraphConfig, InsightRules, StatusKeywords};
use super::types::{Edge, Graph, Node, NodeKind, VideoMeta};

/// Status derived from a video's tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
	FireAttention,
	SafetyAlert,
	NeedsLabeling,
	Overview,
}

impl StatusLevel {
	pub fn label(self) -> &'static str {
		match self {
			StatusLevel::FireAttention => "Fire attention",
			StatusLevel::SafetyAlert => "Safety alert",
			StatusLevel::NeedsLabeling => "Needs labeling",
			StatusLevel::Overview => "Inspection overview",
		}
	}

	pub fn detail(self) -> &'static str {
		match self {
			StatusLevel::FireAttention => {
				"Fire or smoke tags present; check heat sources first"
			}
			StatusLevel::SafetyAlert => {
				"Safety tags present; check protective gear and alert signs"
			}
			StatusLevel::NeedsLabeling => "No tags yet; add keywords so the scene can be understood",
			StatusLevel::Overview => "No explicit risk tags detected",
		}
	}
}

struct Insight {
	label: &'static str,
	detail: &'static str,
	anchor: &'static str,
}

/// Builds the graph for `meta`, or the constant empty-state graph when no
/// video is selected.
pub fn build_graph(meta: Option<&VideoMeta>, config: &GraphConfig) -> Graph {
	let Some(meta) = meta else {
		return empty_state_graph();
	};

	let name = if meta.name.trim().is_empty() {
		"Untitled video"
	} else {
		meta.name.as_str()
	};
	let src = if meta.src.is_empty() { "unknown" } else { meta.src.as_str() };
	let duration_label = meta
		.duration_formatted
		.clone()
		.unwrap_or_else(|| format_duration(meta.duration()));
	let summary = match meta.summary.trim() {
		"" => "No summary provided",
		text => text,
	};
	let tag_detail = if meta.tags.is_empty() {
		"No tags".to_string()
	} else {
		meta.tags.join(", ")
	};
	let status = derive_status(&meta.tags, &config.status);

	let mut nodes = vec![
		Node::new("video", name, NodeKind::Core, format!("Source: {src}")).pinned(),
		Node::new("summary", "Summary", NodeKind::Summary, summary),
		Node::new(
			"duration",
			format!("Duration {duration_label}"),
			NodeKind::Metric,
			describe_duration(meta.duration()),
		),
		Node::new(
			"uploaded",
			"Uploaded",
			NodeKind::Meta,
			format_upload_time(meta.uploaded_at.as_deref()),
		),
		Node::new("tag-hub", "Tags", NodeKind::Hub, tag_detail),
		Node::new("status", status.label(), NodeKind::Status, status.detail()),
	];
	let mut edges = vec![
		Edge::highlight("video", "summary"),
		Edge::new("video", "duration"),
		Edge::new("video", "uploaded"),
		Edge::new("video", "tag-hub"),
		Edge::new("video", "status"),
	];

	for (idx, tag) in meta.tags.iter().enumerate() {
		let id = format!("tag-{idx}");
		edges.push(Edge::new("tag-hub", id.as_str()));
		nodes.push(Node::new(id, tag.as_str(), NodeKind::Tag, format!("Tag: {tag}")));
	}

	for (idx, insight) in derive_insights(meta, &config.insights).into_iter().enumerate() {
		let id = format!("insight-{idx}");
		edges.push(Edge::highlight(insight.anchor, id.as_str()));
		let mut node = Node::new(id, insight.label, NodeKind::Insight, insight.detail);
		node.anchor = Some(insight.anchor.to_string());
		nodes.push(node);
	}

	Graph { nodes, edges }
}

fn empty_state_graph() -> Graph {
	Graph {
		nodes: vec![
			Node::new(
				"context",
				"General context",
				NodeKind::Core,
				"No video selected; showing default relations",
			)
			.pinned(),
			Node::new(
				"task",
				"Task",
				NodeKind::Summary,
				"Define the analysis goal for the scene",
			),
			Node::new("scene", "Scene", NodeKind::Meta, "Default base scene node"),
			Node::new(
				"risk",
				"Potential risk",
				NodeKind::Status,
				"Risk depends on the video content",
			),
		],
		edges: vec![
			Edge::new("context", "task"),
			Edge::new("context", "scene"),
			Edge::new("task", "risk"),
		],
	}
}

pub fn derive_status(tags: &[String], keywords: &StatusKeywords) -> StatusLevel {
	let tags: Vec<String> = tags.iter().map(|tag| tag.to_lowercase()).collect();
	let any_match = |words: &[String]| {
		tags.iter()
			.any(|tag| words.iter().any(|word| tag.contains(word.as_str())))
	};

	if any_match(&keywords.fire) {
		StatusLevel::FireAttention
	} else if any_match(&keywords.safety) {
		StatusLevel::SafetyAlert
	} else if tags.is_empty() {
		StatusLevel::NeedsLabeling
	} else {
		StatusLevel::Overview
	}
}

fn derive_insights(meta: &VideoMeta, rules: &InsightRules) -> Vec<Insight> {
	let mut insights = Vec::new();
	let seconds = meta.duration();

	if seconds >= rules.long_form_seconds {
		insights.push(Insight {
			label: "Long-form inspection",
			detail: "Runs for several minutes; review it in key segments",
			anchor: "duration",
		});
	} else if seconds > 0.0 && seconds < rules.short_clip_seconds {
		insights.push(Insight {
			label: "Short clip",
			detail: "Under a minute long; analysis may lack context",
			anchor: "duration",
		});
	}

	if meta.tags.len() >= rules.multi_tag_count {
		insights.push(Insight {
			label: "Multi-tag scene",
			detail: "Many tags; focus on the three most important",
			anchor: "tag-hub",
		});
	}

	if meta.summary.trim().is_empty() {
		insights.push(Insight {
			label: "Missing summary",
			detail: "Summary is empty; describe the key scenes in the chat panel",
			anchor: "summary",
		});
	}

	insights
}

/// `mm:ss`, or `--:--` for a missing duration.
pub fn format_duration(seconds: f64) -> String {
	if !seconds.is_finite() || seconds <= 0.0 {
		return "--:--".to_string();
	}
	let total = seconds.floor() as u64;
	format!("{:02}:{:02}", total / 60, total % 60)
}

fn describe_duration(seconds: f64) -> String {
	if seconds <= 0.0 {
		return "Duration unavailable; reload the video metadata".to_string();
	}
	format!(
		"About {:.1} minutes ({} seconds)",
		seconds / 60.0,
		seconds.round() as u64
	)
}

/// Formats an RFC 3339 timestamp as `YYYY-MM-DD HH:MM` in its own offset.
pub fn format_upload_time(value: Option<&str>) -> String {
	match value.map(str::trim) {
		None | Some("") => "Upload time not recorded".to_string(),
		Some(raw) => match DateTime::parse_from_rfc3339(raw) {
			Ok(time) => time.format("%Y-%m-%d %H:%M").to_string(),
			Err(_) => "Upload time malformed".to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn meta() -> VideoMeta {
		VideoMeta {
			id: "v1".into(),
			name: "Dock camera".into(),
			src: "./cache_videos/dock.mp4".into(),
			tags: vec!["helmet".into()],
			summary: "Workers unloading".into(),
			duration_seconds: Some(120.0),
			duration_formatted: Some("02:00".into()),
			uploaded_at: Some("2025-03-04T09:05:00Z".into()),
		}
	}

	fn ids(graph: &Graph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	fn insights(graph: &Graph) -> Vec<(&str, &str)> {
		graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Insight)
			.map(|n| (n.label.as_str(), n.anchor.as_deref().unwrap_or("")))
			.collect()
	}

	#[test]
	fn empty_state_is_constant() {
		let graph = build_graph(None, &GraphConfig::default());
		assert_eq!(ids(&graph), vec!["context", "task", "scene", "risk"]);
		assert_eq!(graph.edges.len(), 3);
		assert!(graph.nodes[0].fixed);
		assert_eq!(graph.nodes.iter().filter(|n| n.fixed).count(), 1);
	}

	#[test]
	fn video_graph_has_core_and_top_level_edges() {
		let graph = build_graph(Some(&meta()), &GraphConfig::default());
		assert_eq!(
			ids(&graph),
			vec!["video", "summary", "duration", "uploaded", "tag-hub", "status", "tag-0"]
		);
		assert_eq!(graph.nodes[0].label, "Dock camera");
		assert!(graph.nodes[0].fixed);
		assert_eq!(graph.nodes[2].label, "Duration 02:00");
		assert_eq!(graph.nodes[3].detail, "2025-03-04 09:05");
		assert_eq!(graph.nodes[5].label, "Inspection overview");
		assert!(insights(&graph).is_empty());
		assert!(graph.edges.contains(&Edge::highlight("video", "summary")));
		assert!(graph.edges.contains(&Edge::new("tag-hub", "tag-0")));
		assert_eq!(graph.resolved_edges().count(), graph.edges.len());
	}

	#[test]
	fn many_tags_and_blank_summary_yield_two_insights() {
		let mut meta = meta();
		meta.tags = ["fire", "helmet", "helmet", "line", "zone"]
			.iter()
			.map(|t| t.to_string())
			.collect();
		meta.summary = "".into();
		let graph = build_graph(Some(&meta), &GraphConfig::default());

		assert_eq!(
			insights(&graph),
			vec![("Multi-tag scene", "tag-hub"), ("Missing summary", "summary")]
		);
		assert_eq!(graph.node("status").map(|n| n.label.as_str()), Some("Fire attention"));
		assert_eq!(graph.node("summary").map(|n| n.detail.as_str()), Some("No summary provided"));
		assert!(graph.edges.contains(&Edge::highlight("tag-hub", "insight-0")));
		assert!(graph.edges.contains(&Edge::highlight("summary", "insight-1")));
		assert_eq!(graph.nodes.iter().filter(|n| n.kind == NodeKind::Tag).count(), 5);
	}

	#[test]
	fn duration_insights_follow_thresholds() {
		let config = GraphConfig::default();
		let mut meta = meta();

		meta.duration_seconds = Some(30.0);
		let graph = build_graph(Some(&meta), &config);
		assert_eq!(insights(&graph), vec![("Short clip", "duration")]);

		meta.duration_seconds = Some(400.0);
		let graph = build_graph(Some(&meta), &config);
		assert_eq!(insights(&graph), vec![("Long-form inspection", "duration")]);

		meta.duration_seconds = Some(120.0);
		assert!(insights(&build_graph(Some(&meta), &config)).is_empty());

		meta.duration_seconds = None;
		assert!(insights(&build_graph(Some(&meta), &config)).is_empty());
	}

	#[test]
	fn status_keywords_are_ordered_and_case_insensitive() {
		let keywords = StatusKeywords::default();
		let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();
		assert_eq!(derive_status(&tags(&["Smoke", "Alert"]), &keywords), StatusLevel::FireAttention);
		assert_eq!(derive_status(&tags(&["SAFETY-vest"]), &keywords), StatusLevel::SafetyAlert);
		assert_eq!(derive_status(&tags(&["安全帽"]), &keywords), StatusLevel::SafetyAlert);
		assert_eq!(derive_status(&[], &keywords), StatusLevel::NeedsLabeling);
		assert_eq!(derive_status(&tags(&["forklift"]), &keywords), StatusLevel::Overview);
	}

	#[test]
	fn thresholds_come_from_config() {
		let mut config = GraphConfig::default();
		config.insights.multi_tag_count = 1;
		config.insights.short_clip_seconds = 200.0;
		let graph = build_graph(Some(&meta()), &config);
		assert_eq!(
			insights(&graph),
			vec![("Short clip", "duration"), ("Multi-tag scene", "tag-hub")]
		);
	}

	#[test]
	fn builder_leaves_input_untouched() {
		let original = meta();
		let copy = original.clone();
		let _ = build_graph(Some(&copy), &GraphConfig::default());
		assert_eq!(copy, original);
	}

	#[test]
	fn duration_and_upload_formatting() {
		assert_eq!(format_duration(0.0), "--:--");
		assert_eq!(format_duration(f64::NAN), "--:--");
		assert_eq!(format_duration(125.9), "02:05");
		assert_eq!(format_upload_time(None), "Upload time not recorded");
		assert_eq!(format_upload_time(Some("yesterday")), "Upload time malformed");
		assert_eq!(
			format_upload_time(Some("2024-12-31T23:59:10+08:00")),
			"2024-12-31 23:59"
		);
	}

	#[test]
	fn missing_name_and_duration_fall_back() {
		let meta = VideoMeta {
			id: "bare".into(),
			..VideoMeta::default()
		};
		let graph = build_graph(Some(&meta), &GraphConfig::default());
		assert_eq!(graph.nodes[0].label, "Untitled video");
		assert_eq!(graph.nodes[0].detail, "Source: unknown");
		assert_eq!(graph.nodes[2].label, "Duration --:--");
		assert_eq!(graph.node("status").map(|n| n.label.as_str()), Some("Needs labeling"));
	}
}
