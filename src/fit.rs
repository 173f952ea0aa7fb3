//! Resize modes and the fit computation.
//!
//! Maps an image's intrinsic size into a container according to a
//! [`ResizeMode`], producing the [`Matrix`] to paint the image with. Pure
//! geometry: no allocation, no pixel access, no engine types.
//!
//! # Example
//!
//! ```
//! use imagefit::{Dimension, ResizeMode, compute_fit};
//!
//! let m = compute_fit(
//!     Dimension::new(100.0, 200.0),
//!     Dimension::new(300.0, 300.0),
//!     ResizeMode::Cover,
//! );
//!
//! // Width fills the container; the overflowing height is centered.
//! assert_eq!((m.scale_x, m.scale_y), (3.0, 3.0));
//! assert_eq!((m.trans_x, m.trans_y), (0.0, -150.0));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::geometry::{Dimension, Rect};
use crate::matrix::{Matrix, ScaleToFit};

/// How an image is fit into its container.
///
/// Names and behavior follow the usual UI image resize modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// Scale uniformly to fill the container, cropping the overflow.
    /// The overflowing axis is centered.
    #[default]
    Cover,

    /// Scale uniformly to fit entirely inside the container.
    /// Anchored at the origin; may leave empty space on one axis.
    Contain,

    /// Scale each axis independently to fill the container exactly.
    Stretch,

    /// Scale uniformly to fit inside the container, centered.
    Center,

    /// Tile the image at its intrinsic size. Affects the tile mode only;
    /// the fit transform is the identity.
    Repeat,
}

impl ResizeMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cover,
        Self::Contain,
        Self::Stretch,
        Self::Center,
        Self::Repeat,
    ];

    /// Lower-case name (`"cover"`, `"contain"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Stretch => "stretch",
            Self::Center => "center",
            Self::Repeat => "repeat",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the [`ResizeMode`] names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseResizeModeError;

impl fmt::Display for ParseResizeModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: cover, contain, stretch, center, repeat")
    }
}

impl core::error::Error for ParseResizeModeError {}

impl FromStr for ResizeMode {
    type Err = ParseResizeModeError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(ParseResizeModeError)
    }
}

/// Fit computation error, returned by [`try_compute_fit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitError {
    /// Image width or height is zero or negative.
    ZeroImageDimension,
    /// Container width or height is zero or negative.
    ZeroContainerDimension,
    /// A dimension is NaN or infinite.
    NonFiniteDimension,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroImageDimension => "image has zero width or height",
            Self::ZeroContainerDimension => "container has zero width or height",
            Self::NonFiniteDimension => "dimension is not finite",
        })
    }
}

impl core::error::Error for FitError {}

/// Compute the transform that fits `image` into `container` under `mode`.
///
/// Inputs are not validated. A zero image dimension makes the ratios
/// infinite and the result non-finite (except for [`ResizeMode::Center`],
/// which falls back to the identity for an empty image). Use
/// [`try_compute_fit`] to reject such input up front.
///
/// With `rw = container.width / image.width` and
/// `rh = container.height / image.height`:
///
/// - `Cover`: uniform `max(rw, rh)`. When `rw >= rh` the height overflows
///   and is centered with a Y translation; otherwise the width overflows
///   and is centered with an X translation. Equal ratios take the Y branch.
/// - `Contain`: uniform `min(rw, rh)`, no translation.
/// - `Stretch`: `rw` on X, `rh` on Y, no translation.
/// - `Center`: rect-to-rect mapping with [`ScaleToFit::Center`].
/// - `Repeat`: identity.
pub fn compute_fit(image: Dimension, container: Dimension, mode: ResizeMode) -> Matrix {
    let rw = container.width / image.width;
    let rh = container.height / image.height;
    let mut m = Matrix::default();

    match mode {
        ResizeMode::Cover => {
            let scale = rw.max(rh);
            if rw >= rh {
                m.set_translate_y((container.height - image.height * scale) / 2.0);
            } else {
                m.set_translate_x((container.width - image.width * scale) / 2.0);
            }
            m.set_scale_x(scale).set_scale_y(scale);
        }
        ResizeMode::Contain => {
            let scale = rw.min(rh);
            m.set_scale_x(scale).set_scale_y(scale);
        }
        ResizeMode::Stretch => {
            m.set_scale_x(rw).set_scale_y(rh);
        }
        ResizeMode::Center => {
            m.set_rect_to_rect(
                Rect::from_size(image),
                Rect::from_size(container),
                ScaleToFit::Center,
            );
        }
        // Tiling is chosen at shader construction; geometry stays untouched.
        ResizeMode::Repeat => {}
    }

    log::trace!("fit {image:?} into {container:?} ({mode}): {m:?}");
    m
}

/// Like [`compute_fit`], but rejects empty or non-finite dimensions.
pub fn try_compute_fit(
    image: Dimension,
    container: Dimension,
    mode: ResizeMode,
) -> Result<Matrix, FitError> {
    if !image.is_finite() || !container.is_finite() {
        return Err(FitError::NonFiniteDimension);
    }
    if image.is_empty() {
        return Err(FitError::ZeroImageDimension);
    }
    if container.is_empty() {
        return Err(FitError::ZeroContainerDimension);
    }
    Ok(compute_fit(image, container, mode))
}

/// Where the image's bounds land in container space under `mode`.
///
/// For `Cover` the result overflows the container; for `Contain` and
/// `Center` it lies inside; for `Stretch` it equals the container. For
/// `Repeat` it is the image's own rect (one tile).
pub fn fitted_rect(image: Dimension, container: Dimension, mode: ResizeMode) -> Rect {
    compute_fit(image, container, mode).map_rect(Rect::from_size(image))
}
