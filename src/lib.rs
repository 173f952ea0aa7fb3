//! Resize-mode fit transforms and tiled image shader binding.
//!
//! Pure geometry plus thin glue to an external rendering engine: no pixel
//! operations, no decoding, `no_std` compatible.
//!
//! # Modules
//!
//! - [`fit`]: Resize modes (cover, contain, stretch, center, repeat) and the fit transform
//! - [`matrix`]: Scale/translate paint transform with rect-to-rect mapping
//! - [`geometry`]: Dimension and rect value types
//! - [`shader`]: Tile mode selection and shader construction through the engine's [`Image`]
//! - [`load`]: Asynchronous loading with latest-request-wins [`ImageSlot`]

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod fit;
pub mod geometry;
pub mod load;
pub mod matrix;
pub mod shader;

pub use fit::{FitError, ParseResizeModeError, ResizeMode, compute_fit, fitted_rect, try_compute_fit};
pub use geometry::{Dimension, PixelRect, Rect};
pub use load::{Completion, ImageLoader, ImageSlot, LoadRequest, LoadTicket, Loaded};
pub use matrix::{Matrix, ScaleToFit};
pub use shader::{Image, TileMode, build_shader, make_image_shader, tile_mode_for};
