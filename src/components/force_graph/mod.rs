mod component;
mod frame_loop;
mod palette;
mod render;
mod state;

pub use component::ForceGraphCanvas;
