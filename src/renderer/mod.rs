//! Rendering
//!
//! The layout math is target-independent; painting uses the Canvas 2D API.

pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::Viewport;
