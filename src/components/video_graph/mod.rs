//! Canvas graph of a single video's metadata for the review console.

mod builder;
mod camera;
mod component;
mod config;
mod interaction;
mod layout;
mod render;
mod scene;
mod state;
mod tooltip;
mod types;

pub use component::VideoGraphCanvas;
pub use config::GraphConfig;
pub use state::GraphSession;
pub use types::VideoMeta;
