use leptos::prelude::*;
use log::warn;

use crate::components::video_graph::{VideoGraphCanvas, VideoMeta};
use crate::manifest::VideoManifest;

const SAMPLE_MANIFEST: &str = include_str!("../../assets/sample_manifest.json");

fn load_manifest() -> VideoManifest {
	VideoManifest::from_json(SAMPLE_MANIFEST).unwrap_or_else(|err| {
		warn!("{err}; starting with an empty library");
		VideoManifest::default()
	})
}

/// Review console: pick a video, inspect its metadata graph.
#[component]
pub fn Home() -> impl IntoView {
	let manifest = StoredValue::new(load_manifest());
	let first = manifest.with_value(|m| m.videos.first().map(|v| v.id.clone()));
	let (selected, set_selected) = signal(first);

	let video = Signal::derive(move || {
		let id = selected.get()?;
		manifest.with_value(|m| m.find(&id).cloned())
	});

	let entries = manifest.with_value(|m| m.videos.clone());
	let picker = entries
		.into_iter()
		.map(|meta: VideoMeta| {
			let id = meta.id.clone();
			let is_current = {
				let id = id.clone();
				move || selected.get().as_deref() == Some(id.as_str())
			};
			view! {
				<li>
					<button
						class="video-pick"
						class=("is-current", is_current)
						on:click=move |_| set_selected.set(Some(id.clone()))
					>
						{meta.name}
					</button>
				</li>
			}
		})
		.collect_view();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="review-console">
				<aside class="video-library">
					<h2>"Library"</h2>
					<ul>
						{picker}
						<li>
							<button
								class="video-pick"
								class=("is-current", move || selected.get().is_none())
								on:click=move |_| set_selected.set(None)
							>
								"No video"
							</button>
						</li>
					</ul>
					// Same video again: the graph is rebuilt from scratch.
					<button class="graph-refresh" on:click=move |_| set_selected.update(|_| {})>
						"Refresh graph"
					</button>
				</aside>
				<section class="graph-panel">
					<VideoGraphCanvas video=video />
					<p class="subtitle">
						"Click a node for details. Drag nodes to reposition. Scroll to zoom. Drag background to pan."
					</p>
				</section>
			</div>
		</ErrorBoundary>
	}
}
