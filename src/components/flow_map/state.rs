use super::project::project;
use super::types::MapData;

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
/// Zoom change per unit of wheel delta; sign chosen so scroll up zooms in.
pub const WHEEL_ZOOM_RATE: f64 = 0.001;
/// Pointer-to-node proximity tolerance in projection-space units.
pub const HIT_RADIUS: f64 = 30.0;

/// Pan offset and zoom scale applied to the whole surface before drawing:
/// translate(offset) then scale(zoom).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
	pub zoom: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}
}

impl Camera {
	/// Surface coordinates (pointer events) back into projection space.
	pub fn to_model(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.offset_x) / self.zoom,
			(sy - self.offset_y) / self.zoom,
		)
	}

	/// Projection space out to surface coordinates.
	pub fn to_surface(&self, mx: f64, my: f64) -> (f64, f64) {
		(
			mx * self.zoom + self.offset_x,
			my * self.zoom + self.offset_y,
		)
	}

	/// Wheel delta to zoom change, clamped on every update.
	pub fn apply_wheel(&mut self, delta_y: f64) {
		self.zoom = (self.zoom - delta_y * WHEEL_ZOOM_RATE).clamp(ZOOM_MIN, ZOOM_MAX);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.offset_x += dx;
		self.offset_y += dy;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub anchor_x: f64,
	pub anchor_y: f64,
}

pub struct FlowMapState {
	pub data: MapData,
	pub camera: Camera,
	pub drag: DragState,
	pub hovered: Option<String>,
	pub selected: Option<String>,
	pub width: f64,
	pub height: f64,
	pub clock: f64,
}

impl FlowMapState {
	pub fn new(data: MapData, width: f64, height: f64) -> Self {
		Self {
			data,
			camera: Camera::default(),
			drag: DragState::default(),
			hovered: None,
			selected: None,
			width,
			height,
			clock: 0.0,
		}
	}

	/// Swap in a new snapshot. Hover/selection ids may no longer resolve;
	/// lookups treat that the same as a dangling link and yield nothing.
	pub fn set_data(&mut self, data: MapData) {
		self.data = data;
	}

	pub fn tick(&mut self, dt: f64) {
		self.clock += dt;
	}

	/// First node (declaration order) whose projected center lies within
	/// [`HIT_RADIUS`] of the pointer, after undoing the camera transform.
	/// First match wins, not nearest match.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (mx, my) = self.camera.to_model(sx, sy);
		for node in &self.data.nodes {
			let (nx, ny) = project(node.lat, node.lon, self.width, self.height);
			let (dx, dy) = (nx - mx, ny - my);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				return Some(node.id.clone());
			}
		}
		None
	}

	/// Click toggles selection of the hovered node; clicking the node that is
	/// already selected clears it. No hover, no change.
	pub fn toggle_selection(&mut self) {
		let Some(hovered) = self.hovered.clone() else {
			return;
		};
		if self.selected.as_deref() == Some(hovered.as_str()) {
			self.selected = None;
		} else {
			self.selected = Some(hovered);
		}
	}

	pub fn begin_drag(&mut self, sx: f64, sy: f64) {
		self.drag.active = true;
		self.drag.anchor_x = sx;
		self.drag.anchor_y = sy;
	}

	/// Pan by the delta since the last move, then rebase the anchor so the
	/// next move pans incrementally rather than anchor-to-current.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		self.camera
			.pan_by(sx - self.drag.anchor_x, sy - self.drag.anchor_y);
		self.drag.anchor_x = sx;
		self.drag.anchor_y = sy;
	}

	pub fn end_drag(&mut self) {
		self.drag.active = false;
	}

	pub fn reset_view(&mut self) {
		self.camera.reset();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
