//! Small math types shared across the workspace.
//!
//! Public vector quantities are plain arrays so callers can bring their own
//! math library; `mint` conversions cover the interop cases.

/// 2D vector compatible with mint
pub type Vector2 = [f32; 2];

/// 2D integer vector compatible with mint
pub type IVector2 = [i32; 2];

/// Mint-compatible 2D vector type
pub type MintVec2 = mint::Vector2<f32>;

/// Mint-compatible 2D integer vector type
pub type MintIVec2 = mint::Vector2<i32>;

pub fn vec2(x: f32, y: f32) -> Vector2 {
    [x, y]
}

pub fn ivec2(x: i32, y: i32) -> IVector2 {
    [x, y]
}

/// Rectangle with a position and an extent, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a rectangle from mint-compatible position and size vectors.
    pub fn from_pos_size(pos: impl Into<MintVec2>, size: impl Into<MintVec2>) -> Self {
        let pos = pos.into();
        let size = size.into();
        Rect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn position(&self) -> Vector2 {
        [self.x, self.y]
    }

    pub fn size(&self) -> Vector2 {
        [self.w, self.h]
    }
}
