use serde::{Deserialize, Serialize};

/// Page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4 in points.
    pub const A4: PageSize = PageSize { width: 595.0, height: 842.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Per-edge spacing where each edge may be left unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeMargins {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl EdgeMargins {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn top_or_zero(&self) -> f32 {
        self.top.unwrap_or(0.0)
    }

    pub fn bottom_or_zero(&self) -> f32 {
        self.bottom.unwrap_or(0.0)
    }

    pub fn left_or_zero(&self) -> f32 {
        self.left.unwrap_or(0.0)
    }

    pub fn right_or_zero(&self) -> f32 {
        self.right.unwrap_or(0.0)
    }
}
