//! SVG re-theming - applies a palette to a rendered diagram tree.
//!
//! Works on any [`Styleable`](crate::dom::Styleable) tree; no layout or drawing happens here.

mod applicator;
mod styles;

pub use applicator::{apply, apply_with, inject_theme_style};
pub use styles::{
    build_style_block, is_shape_tag, is_text_tag, MARKER_CLASS, SHAPE_TAGS, TEXT_TAGS,
    UNAVAILABLE_CLASS,
};
