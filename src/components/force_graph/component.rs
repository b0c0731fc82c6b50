use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::frame_loop::FrameLoop;
use super::render;
use super::state::ForceGraphState;
use crate::topology::Topology;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

const FRAME_DT: f32 = 0.016;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Run `f` on the live simulation, if one has been built.
fn with_state(state: &SharedState, f: impl FnOnce(&mut ForceGraphState)) {
	if let Some(s) = state.borrow_mut().as_mut() {
		f(s);
	}
}

/// Interactive force-directed view of a topology.
///
/// The simulation is rebuilt every time `data` changes. The animation loop starts once and is
/// stopped, together with the resize listener, when the component unmounts.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Topology>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let frames = FrameLoop::default();

	let (state_init, animate_init, resize_cb_init, frames_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), frames.clone());
	Effect::new(move |_| {
		let topology = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("No window available, graph not started");
			return;
		};

		let parent_size = || {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
		};
		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let (pw, ph) = parent_size().unwrap_or((800.0, 600.0));
			(width.unwrap_or(pw), height.unwrap_or(ph))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let graph = ForceGraphState::new(&topology, w, h);
		debug!(
			"Graph rebuilt: {} nodes, {} edges",
			topology.nodes.len(),
			graph.edge_count()
		);
		*state_init.borrow_mut() = Some(graph);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("Canvas has no 2d context, graph not started");
			return;
		};
		if !frames_init.start() {
			return;
		}

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				with_state(&state_resize, |s| s.resize(nw, nh));
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			*resize_cb_init.borrow_mut() = Some(cb);
		}

		let (state_anim, animate_inner, frames_anim) =
			(state_init.clone(), animate_init.clone(), frames_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !frames_anim.is_running() {
				return;
			}
			with_state(&state_anim, |s| {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frames_anim.set_pending(id);
				}
			}
		}));
		if let Some(cb) = &*animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frames_init.set_pending(id);
			}
		}
	});

	// The frame callback holds a handle to itself; dropping it here breaks that cycle.
	let teardown = SendWrapper::new((state.clone(), animate, resize_cb, frames));
	on_cleanup(move || {
		let (state, animate, resize_cb, frames) = teardown.take();
		let window = web_sys::window();
		if let (Some(id), Some(win)) = (frames.stop(), &window) {
			let _ = win.cancel_animation_frame(id);
		}
		if let (Some(cb), Some(win)) = (resize_cb.borrow_mut().take(), &window) {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		animate.borrow_mut().take();
		state.borrow_mut().take();
		debug!("Graph torn down");
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			with_state(&state_md, |s| s.press(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			with_state(&state_mm, |s| s.pointer_moved(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| with_state(&state_mu, ForceGraphState::release);

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| with_state(&state_ml, ForceGraphState::pointer_left);

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			with_state(&state_wh, |s| s.zoom_at(x, y, ev.delta_y()));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
