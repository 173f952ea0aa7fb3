//! 2D affine paint transform with an engine-style mutable builder API.
//!
//! The layout mirrors the row-major 2x3 matrix used by 2D rendering
//! engines:
//!
//! ```text
//!     | scale_x  skew_x   trans_x |     x' = scale_x * x + skew_x  * y + trans_x
//!     | skew_y   scale_y  trans_y |     y' = skew_y  * x + scale_y * y + trans_y
//!     |   0        0         1    |
//! ```
//!
//! Fit computations only ever produce scale + translate matrices, but the
//! skew terms are kept so a [`Matrix`] can be handed to an engine as-is.

use crate::geometry::Rect;

/// How [`Matrix::set_rect_to_rect`] maps a source rect into a destination.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleToFit {
    /// Scale each axis independently so `src` fills `dst` exactly.
    Fill,
    /// Uniform scale, aligned to the left/top of `dst`.
    Start,
    /// Uniform scale, centered inside `dst`.
    #[default]
    Center,
    /// Uniform scale, aligned to the right/bottom of `dst`.
    End,
}

/// Affine transform: scale, skew, and translate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    pub scale_x: f32,
    pub skew_x: f32,
    pub trans_x: f32,
    pub skew_y: f32,
    pub scale_y: f32,
    pub trans_y: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 1.0,
        trans_y: 0.0,
    };

    const ZERO: Self = Self {
        scale_x: 0.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 0.0,
        trans_y: 0.0,
    };

    /// Pure scale.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            ..Self::IDENTITY
        }
    }

    /// Pure translation.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            trans_x: tx,
            trans_y: ty,
            ..Self::IDENTITY
        }
    }

    /// Reset to the identity.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    pub fn set_scale_x(&mut self, v: f32) -> &mut Self {
        self.scale_x = v;
        self
    }

    pub fn set_scale_y(&mut self, v: f32) -> &mut Self {
        self.scale_y = v;
        self
    }

    pub fn set_translate_x(&mut self, v: f32) -> &mut Self {
        self.trans_x = v;
        self
    }

    pub fn set_translate_y(&mut self, v: f32) -> &mut Self {
        self.trans_y = v;
        self
    }

    /// Replace this matrix with one that maps `src` onto `dst` under `stf`.
    ///
    /// Returns `false` and resets to the identity when `src` is empty.
    /// An empty `dst` zeroes every component (everything maps to nothing)
    /// and returns `true`.
    ///
    /// For the uniform policies, the axis with the smaller ratio limits the
    /// scale; the slack left on the other axis is distributed according to
    /// the policy (`Start` none, `Center` half, `End` all of it).
    pub fn set_rect_to_rect(&mut self, src: Rect, dst: Rect, stf: ScaleToFit) -> bool {
        if src.is_empty() {
            self.reset();
            return false;
        }
        if dst.is_empty() {
            *self = Self::ZERO;
            return true;
        }

        let mut sx = dst.width / src.width;
        let mut sy = dst.height / src.height;
        let mut x_larger = false;

        if stf != ScaleToFit::Fill {
            if sx > sy {
                x_larger = true;
                sx = sy;
            } else {
                sy = sx;
            }
        }

        let mut tx = dst.x - src.x * sx;
        let mut ty = dst.y - src.y * sy;

        if matches!(stf, ScaleToFit::Center | ScaleToFit::End) {
            let mut diff = if x_larger {
                dst.width - src.width * sy
            } else {
                dst.height - src.height * sy
            };
            if stf == ScaleToFit::Center {
                diff *= 0.5;
            }
            if x_larger {
                tx += diff;
            } else {
                ty += diff;
            }
        }

        *self = Self {
            scale_x: sx,
            skew_x: 0.0,
            trans_x: tx,
            skew_y: 0.0,
            scale_y: sy,
            trans_y: ty,
        };
        true
    }

    /// `self = self * Translate(dx, dy)`: translate before this transform.
    pub fn pre_translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.trans_x += self.scale_x * dx + self.skew_x * dy;
        self.trans_y += self.skew_y * dx + self.scale_y * dy;
        self
    }

    /// `self = other * self`: apply `other` after this transform.
    pub fn post_concat(&mut self, other: &Matrix) -> &mut Self {
        *self = Self::concat(other, self);
        self
    }

    /// `a * b`: the transform that applies `b` first, then `a`.
    pub fn concat(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix {
            scale_x: a.scale_x * b.scale_x + a.skew_x * b.skew_y,
            skew_x: a.scale_x * b.skew_x + a.skew_x * b.scale_y,
            trans_x: a.scale_x * b.trans_x + a.skew_x * b.trans_y + a.trans_x,
            skew_y: a.skew_y * b.scale_x + a.scale_y * b.skew_y,
            scale_y: a.skew_y * b.skew_x + a.scale_y * b.scale_y,
            trans_y: a.skew_y * b.trans_x + a.scale_y * b.trans_y + a.trans_y,
        }
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.scale_x * x + self.skew_x * y + self.trans_x,
            self.skew_y * x + self.scale_y * y + self.trans_y,
        )
    }

    /// Axis-aligned bounds of `rect` after mapping its four corners.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(rect.x, rect.y),
            self.map_point(rect.right(), rect.y),
            self.map_point(rect.x, rect.bottom()),
            self.map_point(rect.right(), rect.bottom()),
        ];
        let (mut l, mut t) = corners[0];
        let (mut r, mut b) = corners[0];
        for &(x, y) in &corners[1..] {
            l = l.min(x);
            t = t.min(y);
            r = r.max(x);
            b = b.max(y);
        }
        Rect::from_ltrb(l, t, r, b)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// No skew terms: the matrix only scales and translates.
    pub fn is_scale_translate(&self) -> bool {
        self.skew_x == 0.0 && self.skew_y == 0.0
    }

    /// All six components are finite. Zero-sized fit inputs break this.
    pub fn is_finite(&self) -> bool {
        self.scale_x.is_finite()
            && self.skew_x.is_finite()
            && self.trans_x.is_finite()
            && self.skew_y.is_finite()
            && self.scale_y.is_finite()
            && self.trans_y.is_finite()
    }

    /// Components in `[scale_x, skew_y, skew_x, scale_y, trans_x, trans_y]`
    /// column order, as taken by most GPU and canvas APIs.
    pub fn to_column_major(&self) -> [f32; 6] {
        [
            self.scale_x,
            self.skew_y,
            self.skew_x,
            self.scale_y,
            self.trans_x,
            self.trans_y,
        ]
    }
}

#[cfg(feature = "kurbo")]
impl From<Matrix> for kurbo::Affine {
    fn from(m: Matrix) -> Self {
        let c = m.to_column_major();
        kurbo::Affine::new([
            f64::from(c[0]),
            f64::from(c[1]),
            f64::from(c[2]),
            f64::from(c[3]),
            f64::from(c[4]),
            f64::from(c[5]),
        ])
    }
}
