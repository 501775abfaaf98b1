use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::project::project;
use super::state::FlowMapState;
use super::types::FlowLink;

const BACKGROUND: &str = "#0a0e1a";
const GRID_COLOR: &str = "rgba(100, 140, 200, 0.12)";
const LAND_COLOR: &str = "rgba(45, 62, 96, 0.35)";
const GRID_LON_STEP: i32 = 30;
const GRID_LAT_STEP: i32 = 20;

/// Upward bias of the quadratic control point, lifting links into arcs.
const ARC_LIFT: f64 = 60.0;
const LINK_WIDTH_DIVISOR: f64 = 4_000.0;
const LINK_ALPHA: f64 = 0.55;

/// One particle per this much flow value, capped so dense graphs stay legible.
const PARTICLE_UNIT: f64 = 2_000.0;
const MAX_PARTICLES: usize = 6;
const PARTICLE_PERIOD: f64 = 3.0;
const PARTICLE_RADIUS: f64 = 2.5;

const NODE_RADIUS_DIVISOR: f64 = 600.0;
const HOVER_SCALE: f64 = 1.3;

/// Coarse landmass placeholders as (lat N, lon W, lat S, lon E) boxes.
/// Decorative context only, not geography.
const LANDMASSES: &[(f64, f64, f64, f64)] = &[
	(60.0, -130.0, 25.0, -70.0),  // North America
	(10.0, -80.0, -40.0, -50.0),  // South America
	(58.0, -10.0, 38.0, 30.0),    // Europe
	(32.0, -15.0, -30.0, 45.0),   // Africa
	(60.0, 40.0, 10.0, 140.0),    // Asia
	(-12.0, 115.0, -36.0, 150.0), // Australia
];

pub fn render(state: &FlowMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.camera.offset_x, state.camera.offset_y);
	let _ = ctx.scale(state.camera.zoom, state.camera.zoom);
	draw_backdrop(state, ctx);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_backdrop(state: &FlowMapState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.width, state.height);

	ctx.set_stroke_style_str(GRID_COLOR);
	ctx.set_line_width(1.0 / state.camera.zoom);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(4.0),
		&JsValue::from_f64(6.0),
	));

	let mut lon = -180;
	while lon <= 180 {
		let (x, _) = project(0.0, lon as f64, w, h);
		ctx.begin_path();
		ctx.move_to(x, 0.0);
		ctx.line_to(x, h);
		ctx.stroke();
		lon += GRID_LON_STEP;
	}
	let mut lat = -80;
	while lat <= 80 {
		let (_, y) = project(lat as f64, 0.0, w, h);
		ctx.begin_path();
		ctx.move_to(0.0, y);
		ctx.line_to(w, y);
		ctx.stroke();
		lat += GRID_LAT_STEP;
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_fill_style_str(LAND_COLOR);
	for &(lat_n, lon_w, lat_s, lon_e) in LANDMASSES {
		let (x0, y0) = project(lat_n, lon_w, w, h);
		let (x1, y1) = project(lat_s, lon_e, w, h);
		rounded_rect(ctx, x0, y0, x1 - x0, y1 - y0, 14.0);
		ctx.fill();
	}
}

fn draw_links(state: &FlowMapState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.width, state.height);
	for link in &state.data.links {
		// Unresolvable endpoints: skip this link, keep the frame.
		let Some((src, dst)) = state.data.resolve(link) else {
			continue;
		};
		let p0 = project(src.lat, src.lon, w, h);
		let p1 = project(dst.lat, dst.lon, w, h);
		let c = control_point(p0, p1);

		let (from, to) = link.kind.gradient();
		let gradient = ctx.create_linear_gradient(p0.0, p0.1, p1.0, p1.1);
		let _ = gradient.add_color_stop(0.0, &hex_to_rgba(from, LINK_ALPHA));
		let _ = gradient.add_color_stop(1.0, &hex_to_rgba(to, LINK_ALPHA));

		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(link_width(link.value));
		ctx.begin_path();
		ctx.move_to(p0.0, p0.1);
		ctx.quadratic_curve_to(c.0, c.1, p1.0, p1.1);
		ctx.stroke();

		draw_particles(ctx, state.clock, link, p0, c, p1);
	}
}

fn draw_particles(
	ctx: &CanvasRenderingContext2d,
	time: f64,
	link: &FlowLink,
	p0: (f64, f64),
	c: (f64, f64),
	p1: (f64, f64),
) {
	let count = particle_count(link.value);
	if count == 0 {
		return;
	}
	let color = link.kind.particle_color();
	for i in 0..count {
		let (x, y) = curve_point(particle_u(time, i, count), p0, c, p1);

		if let Ok(glow) = ctx.create_radial_gradient(x, y, 0.5, x, y, PARTICLE_RADIUS * 3.0) {
			let _ = glow.add_color_stop(0.0, &hex_to_rgba(color, 0.5));
			let _ = glow.add_color_stop(1.0, &hex_to_rgba(color, 0.0));
			ctx.begin_path();
			let _ = ctx.arc(x, y, PARTICLE_RADIUS * 3.0, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&glow);
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, PARTICLE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
	}
}

fn draw_nodes(state: &FlowMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera.zoom;
	for node in &state.data.nodes {
		let (x, y) = project(node.lat, node.lon, state.width, state.height);
		let hovered = state.hovered.as_deref() == Some(node.id.as_str());
		let selected = state.selected.as_deref() == Some(node.id.as_str());

		let scale = if hovered { HOVER_SCALE } else { 1.0 };
		let radius = (node_radius(node.value) * scale + pulse(state.clock, node.value)).max(2.0);

		if let Ok(glow) = ctx.create_radial_gradient(x, y, radius * 0.4, x, y, radius * 2.4) {
			let _ = glow.add_color_stop(0.0, &hex_to_rgba(&node.color, 0.35));
			let _ = glow.add_color_stop(1.0, &hex_to_rgba(&node.color, 0.0));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius * 2.4, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&glow);
			ctx.fill();
		}

		// Highlight offset toward the upper left to suggest a light source.
		if let Ok(body) = ctx.create_radial_gradient(
			x - radius * 0.35,
			y - radius * 0.35,
			radius * 0.1,
			x,
			y,
			radius,
		) {
			let _ = body.add_color_stop(0.0, "rgba(255, 255, 255, 0.9)");
			let _ = body.add_color_stop(0.4, &node.color);
			let _ = body.add_color_stop(1.0, &hex_to_rgba(&node.color, 0.55));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&body);
			ctx.fill();
		}

		if selected {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 4.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.85)");
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		ctx.set_text_align("center");
		if hovered {
			ctx.set_fill_style_str("white");
			ctx.set_font("bold 13px sans-serif");
			let _ = ctx.fill_text(&node.name, x, y + radius + 16.0);
			ctx.set_fill_style_str("rgba(200, 212, 232, 0.9)");
			ctx.set_font("11px sans-serif");
			let _ = ctx.fill_text(&node.role, x, y + radius + 30.0);
		} else {
			ctx.set_fill_style_str("rgba(220, 226, 240, 0.75)");
			ctx.set_font("11px sans-serif");
			let _ = ctx.fill_text(&node.name, x, y + radius + 14.0);
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Stroke width grows sub-linearly with flow value, floored at 1px.
fn link_width(value: f64) -> f64 {
	(value.sqrt() / LINK_WIDTH_DIVISOR).max(1.0)
}

/// Node disc radius before hover/pulse adjustments.
fn node_radius(value: f64) -> f64 {
	value.sqrt() / NODE_RADIUS_DIVISOR
}

/// Small sinusoidal breathing term, phased by value so nodes pulse unevenly.
fn pulse(time: f64, value: f64) -> f64 {
	(time * 2.0 + value * 0.0005).sin() * 1.5
}

/// Whole particle count for a flow value: floor division, capped.
fn particle_count(value: f64) -> usize {
	((value / PARTICLE_UNIT) as usize).min(MAX_PARTICLES)
}

/// Parametric position of particle `i` of `count` at `time`, cycling with
/// [`PARTICLE_PERIOD`]. Stateless: recomputed every frame, never tracked.
fn particle_u(time: f64, i: usize, count: usize) -> f64 {
	(time / PARTICLE_PERIOD + i as f64 / count as f64).fract()
}

/// Quadratic Bezier point at parameter `u`.
fn curve_point(u: f64, p0: (f64, f64), c: (f64, f64), p1: (f64, f64)) -> (f64, f64) {
	let v = 1.0 - u;
	(
		v * v * p0.0 + 2.0 * v * u * c.0 + u * u * p1.0,
		v * v * p0.1 + 2.0 * v * u * c.1 + u * u * p1.1,
	)
}

/// Midpoint of the chord, lifted upward so the link reads as an arc.
fn control_point(p0: (f64, f64), p1: (f64, f64)) -> (f64, f64) {
	((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0 - ARC_LIFT)
}

/// `#rrggbb` to an `rgba(..)` css string; anything else passes through.
fn hex_to_rgba(hex: &str, alpha: f64) -> String {
	let digits = hex.strip_prefix('#').unwrap_or(hex);
	if digits.len() != 6 {
		return hex.to_string();
	}
	match (
		u8::from_str_radix(&digits[0..2], 16),
		u8::from_str_radix(&digits[2..4], 16),
		u8::from_str_radix(&digits[4..6], 16),
	) {
		(Ok(r), Ok(g), Ok(b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
		_ => hex.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn particle_count_floors_and_caps() {
		assert_eq!(particle_count(0.0), 0);
		assert_eq!(particle_count(1_999.0), 0);
		assert_eq!(particle_count(10_000.0), 5);
		assert_eq!(particle_count(1_000_000_000.0), MAX_PARTICLES);
	}

	#[test]
	fn particles_cycle_with_the_period() {
		for i in 0..5 {
			let a = particle_u(7.25, i, 5);
			let b = particle_u(7.25 + PARTICLE_PERIOD, i, 5);
			assert!((a - b).abs() < 1e-9, "particle {i}: {a} vs {b}");
		}
	}

	#[test]
	fn particles_spread_evenly_along_the_curve() {
		let (a, b) = (particle_u(0.0, 0, 4), particle_u(0.0, 1, 4));
		assert!((b - a - 0.25).abs() < 1e-9);
	}

	#[test]
	fn curve_hits_endpoints_and_arcs_upward() {
		let p0 = (100.0, 200.0);
		let p1 = (500.0, 200.0);
		let c = control_point(p0, p1);
		assert_eq!(curve_point(0.0, p0, c, p1), p0);
		assert_eq!(curve_point(1.0, p0, c, p1), p1);
		let (mx, my) = curve_point(0.5, p0, c, p1);
		assert_eq!(mx, 300.0);
		assert!(my < 200.0);
	}

	#[test]
	fn link_width_scales_with_sqrt_and_floors_at_one() {
		assert_eq!(link_width(0.0), 1.0);
		assert_eq!(link_width(100.0), 1.0);
		let thick = link_width(1_600_000_000.0);
		assert!((thick - 10.0).abs() < 1e-9);
		assert!(link_width(4.0 * 1_600_000_000.0) > thick);
	}

	#[test]
	fn quadrupled_value_doubles_node_radius() {
		let a = node_radius(100.0);
		let b = node_radius(400.0);
		assert!(b > a);
		assert!((b / a - 2.0).abs() < 1e-9);
	}

	#[test]
	fn hex_colors_convert_to_rgba() {
		assert_eq!(hex_to_rgba("#ffd166", 0.5), "rgba(255, 209, 102, 0.5)");
		assert_eq!(hex_to_rgba("not-a-color", 0.5), "not-a-color");
	}
}
