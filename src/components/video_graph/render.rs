use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCommand, GLOW_BLUR, GLOW_COLOR, LABEL_COLOR, LABEL_FONT, Paint};
use super::types::Bounds;

/// Replays a scene onto a 2d context.
pub fn render(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) {
	for command in commands {
		match command {
			DrawCommand::Save => ctx.save(),
			DrawCommand::Restore => ctx.restore(),
			DrawCommand::Scale(k) => {
				let _ = ctx.scale(*k, *k);
			}
			DrawCommand::Translate(p) => {
				let _ = ctx.translate(p.x, p.y);
			}
			DrawCommand::Clear(size) => ctx.clear_rect(0.0, 0.0, size.width, size.height),
			DrawCommand::FillRect { size, paint } => fill_rect(ctx, *size, paint),
			DrawCommand::Lines {
				segments,
				color,
				width,
			} => {
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				ctx.begin_path();
				for (from, to) in segments {
					ctx.move_to(from.x, from.y);
					ctx.line_to(to.x, to.y);
				}
				ctx.stroke();
			}
			DrawCommand::Circle {
				center,
				radius,
				theme,
				line_width,
				glow,
			} => {
				ctx.begin_path();
				ctx.set_line_width(*line_width);
				ctx.set_stroke_style_str(theme.stroke);
				ctx.set_fill_style_str(theme.fill);
				if *glow {
					ctx.set_shadow_color(GLOW_COLOR);
					ctx.set_shadow_blur(GLOW_BLUR);
				} else {
					ctx.set_shadow_color("transparent");
					ctx.set_shadow_blur(0.0);
				}
				let _ = ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
				ctx.fill();
				ctx.stroke();
				ctx.set_shadow_blur(0.0);
			}
			DrawCommand::Label { text, at } => {
				ctx.set_fill_style_str(LABEL_COLOR);
				ctx.set_font(LABEL_FONT);
				ctx.set_text_align("center");
				ctx.set_text_baseline("top");
				let _ = ctx.fill_text(text, at.x, at.y);
			}
		}
	}
}

fn fill_rect(ctx: &CanvasRenderingContext2d, size: Bounds, paint: &Paint) {
	match paint {
		Paint::Color(color) => ctx.set_fill_style_str(color),
		Paint::LinearGradient { from, to, stops } => {
			let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
			for (offset, color) in stops {
				let _ = gradient.add_color_stop(*offset as f32, color);
			}
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
	}
	ctx.fill_rect(0.0, 0.0, size.width, size.height);
}
