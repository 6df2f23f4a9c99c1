//! # stencilcut CAM Tools
//!
//! Geometry and path planning for stencil cutting.
//!
//! ## Tools Included
//!
//! - **Geometry**: rotation about the origin, justification to the origin, extent queries
//! - **Optimizer**: accuracy-mode segment ordering, speed-mode pass-through, border synthesis
//! - **PIC Import**: line-art strokes from `pstoedit -f pic` output

pub mod geometry;
pub mod optimizer;
pub mod pic;

// Re-export commonly used items
pub use geometry::{justify, max_extent, rotate};
pub use optimizer::{
    border_path, decompose, optimize, order_segments, travel_distance, Border, CutMode, CutPlan,
};
pub use pic::{read_pic, read_pic_file};
