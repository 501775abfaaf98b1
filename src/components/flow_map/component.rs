use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::FlowMapState;
use super::types::MapData;

/// Nominal per-frame time advance driving particle motion and node pulsing.
const FRAME_DT: f64 = 0.016;

fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// World-map canvas animating monetary flows between entities.
///
/// Owns the camera, hover and drag state, and the repaint loop. Selection is
/// surfaced through the `selected` signal so surrounding chrome can show
/// per-node detail.
#[component]
pub fn FlowMapCanvas(
	#[prop(into)] data: Signal<MapData>,
	#[prop(into)] selected: RwSignal<Option<String>>,
	#[prop(default = 1200.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<FlowMapState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let zoom_pct = RwSignal::new(100);
	let (state_init, animate_init, raf_init) = (state.clone(), animate.clone(), raf_id.clone());

	Effect::new(move |_| {
		let snapshot = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// A live engine only needs the new snapshot; the running loop picks
		// it up on its next frame (atomic swap, never a partial edit).
		if let Some(ref mut s) = *state_init.borrow_mut() {
			debug!("flow map snapshot replaced: {} nodes", snapshot.nodes.len());
			s.set_data(snapshot);
			return;
		}

		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		debug!("flow map engine mounted: {} nodes", snapshot.nodes.len());
		*state_init.borrow_mut() = Some(FlowMapState::new(snapshot, width, height));

		// One loop per surface: supersede any pending frame before starting.
		if let Some(id) = raf_init.take() {
			if let Some(win) = web_sys::window() {
				let _ = win.cancel_animation_frame(id);
			}
		}

		let (state_anim, animate_inner, raf_inner) =
			(state_init.clone(), animate_init.clone(), raf_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let Some(win) = web_sys::window() else {
					return;
				};
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					raf_inner.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Some(win) = web_sys::window() {
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					raf_init.set(Some(id));
				}
			}
		}
	});

	// Teardown must leave no scheduled frame behind. The Rc handles are not
	// Send, so they reach the cleanup closure through local storage.
	let teardown = StoredValue::new_local((raf_id.clone(), animate.clone()));
	on_cleanup(move || {
		teardown.with_value(|(raf, animate)| {
			if let Some(id) = raf.take() {
				if let Some(win) = web_sys::window() {
					let _ = win.cancel_animation_frame(id);
				}
			}
			*animate.borrow_mut() = None;
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Hover is recomputed on every move, dragging or not.
			s.hovered = s.node_at_position(x, y);
			s.drag_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.hovered = None;
		}
	};

	let state_cl = state.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_cl.borrow_mut() {
			s.toggle_selection();
			selected.set(s.selected.clone());
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.camera.apply_wheel(ev.delta_y());
			zoom_pct.set((s.camera.zoom * 100.0).round() as i32);
		}
	};

	let state_rs = state.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rs.borrow_mut() {
			s.reset_view();
			zoom_pct.set(100);
		}
	};

	view! {
		<div class="flow-map" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="flow-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="flow-map-controls">
				<span class="zoom-readout">{move || format!("{}%", zoom_pct.get())}</span>
				<button on:click=on_reset>"Reset view"</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use leptos::prelude::*;

	// Closures shaped like the animate callback are !Send; a unit stands in
	// for them here since wasm closures cannot be built on the host.
	type FrameHandles = (Rc<Cell<Option<i32>>>, Rc<RefCell<Option<()>>>);

	#[test]
	fn teardown_closure_meets_cleanup_bounds_and_clears_the_frame() {
		// Same bound `on_cleanup` places on its closure.
		fn cleanup_compatible<F: FnOnce() + Send + Sync + 'static>(f: F) -> F {
			f
		}

		let owner = Owner::new();
		owner.set();

		let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(Some(7)));
		let animate: Rc<RefCell<Option<()>>> = Rc::new(RefCell::new(Some(())));
		let teardown: StoredValue<FrameHandles, LocalStorage> =
			StoredValue::new_local((raf_id.clone(), animate.clone()));

		let cleanup = cleanup_compatible(move || {
			teardown.with_value(|(raf, animate)| {
				raf.take();
				*animate.borrow_mut() = None;
			});
		});
		cleanup();

		assert_eq!(raf_id.get(), None);
		assert!(animate.borrow().is_none());
	}
}
