use thiserror::Error;

/// Failures at the crate's fallible edges: decoding library data and
/// reaching the DOM. Graph building, layout and interaction never fail.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The manifest JSON did not match either accepted shape.
	#[error("invalid video manifest: {0}")]
	Manifest(#[from] serde_json::Error),
	/// Running outside a browser document.
	#[error("browser window or document is not available")]
	NoWindow,
	/// The canvas element has not been mounted yet.
	#[error("canvas is not mounted")]
	NoCanvas,
	/// `getContext("2d")` failed or returned something else.
	#[error("2d canvas context unavailable: {0}")]
	Context(String),
	/// A window or document listener could not be registered.
	#[error("failed to add event listener {0}")]
	Listener(String),
}
