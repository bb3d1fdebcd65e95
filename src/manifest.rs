//! The video library manifest, as served by the upload backend.

use serde::Deserialize;

use crate::components::video_graph::VideoMeta;
use crate::error::GraphError;

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestShape {
	Wrapped {
		#[serde(default)]
		videos: Vec<VideoMeta>,
	},
	Bare(Vec<VideoMeta>),
}

/// Ordered list of library videos, newest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoManifest {
	/// Entries in manifest order.
	pub videos: Vec<VideoMeta>,
}

impl VideoManifest {
	/// Accepts `{"videos": [...]}` or a bare array.
	pub fn from_json(raw: &str) -> Result<Self, GraphError> {
		let videos = match serde_json::from_str(raw)? {
			ManifestShape::Wrapped { videos } => videos,
			ManifestShape::Bare(videos) => videos,
		};
		Ok(Self { videos })
	}

	/// Looks a video up by library id.
	pub fn find(&self, id: &str) -> Option<&VideoMeta> {
		self.videos.iter().find(|video| video.id == id)
	}
}
