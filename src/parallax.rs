//! Hero parallax
//!
//! Layer `i` moves at `(i + 1) * 0.3` of the scroll offset.

use crate::consts::PARALLAX_LAYER_SPEED;

/// Vertical offset in pixels for the layer at `index`
#[inline]
pub fn layer_offset(scroll_y: f32, index: usize) -> f32 {
    scroll_y * (index as f32 + 1.0) * PARALLAX_LAYER_SPEED
}

/// CSS `transform` for the layer at `index`
pub fn layer_transform_css(scroll_y: f32, index: usize) -> String {
    format!("translateY({:.2}px)", layer_offset(scroll_y, index))
}
