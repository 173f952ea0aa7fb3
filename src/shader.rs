//! Binding a loaded image, a container, and a resize mode into a shader.
//!
//! The rendering engine is external. It is reached through the [`Image`]
//! trait, implemented on the engine's own (typically reference-counted)
//! image handle. This module never creates or frees images or shaders; it
//! only decides the transform and tile modes and forwards them.

use crate::fit::{ResizeMode, compute_fit};
use crate::geometry::Dimension;
use crate::matrix::Matrix;

/// What a shader samples outside the image bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Replicate the edge pixels.
    Clamp,
    /// Repeat the image.
    Repeat,
    /// Repeat the image, mirroring every other tile.
    Mirror,
    /// Transparent outside the image.
    #[default]
    Decal,
}

/// Engine image handle.
///
/// Implemented on whatever the engine hands out from its loader. The
/// handle is only read (its size) and passed back to the engine to build
/// a shader.
pub trait Image {
    /// Engine shader handle.
    type Shader;

    /// Intrinsic width in pixels.
    fn width(&self) -> f32;

    /// Intrinsic height in pixels.
    fn height(&self) -> f32;

    /// Ask the engine for a shader sampling this image with `local_matrix`
    /// applied and the given tile modes.
    fn make_shader(
        &self,
        tile_x: TileMode,
        tile_y: TileMode,
        local_matrix: &Matrix,
    ) -> Self::Shader;

    /// Intrinsic size as a [`Dimension`].
    fn dimensions(&self) -> Dimension {
        Dimension::new(self.width(), self.height())
    }
}

macro_rules! forward_image {
    ($($ptr:ty),*) => {$(
        impl<I: Image + ?Sized> Image for $ptr {
            type Shader = I::Shader;

            fn width(&self) -> f32 {
                (**self).width()
            }

            fn height(&self) -> f32 {
                (**self).height()
            }

            fn make_shader(
                &self,
                tile_x: TileMode,
                tile_y: TileMode,
                local_matrix: &Matrix,
            ) -> I::Shader {
                (**self).make_shader(tile_x, tile_y, local_matrix)
            }
        }
    )*};
}

forward_image!(&I);

// Engines commonly hand out shared handles.
#[cfg(feature = "alloc")]
forward_image!(alloc::rc::Rc<I>, alloc::sync::Arc<I>, alloc::boxed::Box<I>);

/// Tile mode for both axes: repeating for [`ResizeMode::Repeat`], decal
/// for everything else.
pub const fn tile_mode_for(mode: ResizeMode) -> TileMode {
    match mode {
        ResizeMode::Repeat => TileMode::Repeat,
        _ => TileMode::Decal,
    }
}

/// Build a shader that paints `image` fitted into `container` under `mode`.
pub fn make_image_shader<I: Image + ?Sized>(
    image: &I,
    container: Dimension,
    mode: ResizeMode,
) -> I::Shader {
    let tile = tile_mode_for(mode);
    let m = compute_fit(image.dimensions(), container, mode);
    image.make_shader(tile, tile, &m)
}

/// Shader for `image` if it is loaded, `None` while it is not.
///
/// `None` means "not ready yet", never a failure. Callers rebuild whenever
/// the image, container, or mode changes; nothing is cached here.
pub fn build_shader<I: Image>(
    image: Option<&I>,
    container: Dimension,
    mode: ResizeMode,
) -> Option<I::Shader> {
    image.map(|image| make_image_shader(image, container, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the shader request instead of rendering.
    struct FakeImage(f32, f32);

    impl Image for FakeImage {
        type Shader = (TileMode, TileMode, Matrix);

        fn width(&self) -> f32 {
            self.0
        }

        fn height(&self) -> f32 {
            self.1
        }

        fn make_shader(&self, tx: TileMode, ty: TileMode, m: &Matrix) -> Self::Shader {
            (tx, ty, *m)
        }
    }

    const SQUARE: Dimension = Dimension::new(300.0, 300.0);

    #[test]
    fn not_loaded_is_none() {
        assert!(build_shader::<FakeImage>(None, SQUARE, ResizeMode::Cover).is_none());
    }

    #[test]
    fn cover_uses_decal_and_fit() {
        let img = FakeImage(100.0, 200.0);
        let (tx, ty, m) = build_shader(Some(&img), SQUARE, ResizeMode::Cover).unwrap();
        assert_eq!((tx, ty), (TileMode::Decal, TileMode::Decal));
        assert_eq!(m, compute_fit(img.dimensions(), SQUARE, ResizeMode::Cover));
    }

    #[test]
    fn repeat_uses_repeat_and_identity() {
        let img = FakeImage(16.0, 16.0);
        let (tx, ty, m) = make_image_shader(&img, SQUARE, ResizeMode::Repeat);
        assert_eq!((tx, ty), (TileMode::Repeat, TileMode::Repeat));
        assert!(m.is_identity());
    }

    #[test]
    fn tile_modes() {
        assert_eq!(tile_mode_for(ResizeMode::Repeat), TileMode::Repeat);
        for mode in [
            ResizeMode::Cover,
            ResizeMode::Contain,
            ResizeMode::Stretch,
            ResizeMode::Center,
        ] {
            assert_eq!(tile_mode_for(mode), TileMode::Decal, "{mode}");
        }
    }

    #[test]
    fn works_through_references() {
        let img = FakeImage(100.0, 200.0);
        let r = &img;
        let (_, _, m) = make_image_shader(&r, SQUARE, ResizeMode::Stretch);
        assert_eq!(m, Matrix::scale(3.0, 1.5));
    }
}
