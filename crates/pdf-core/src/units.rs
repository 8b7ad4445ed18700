//! Physical units and page sizes

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

/// Width and height in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// ISO A4 portrait (210 x 297 mm)
    pub const A4: Size = Size {
        width: 210.0 * POINTS_PER_MM,
        height: 297.0 * POINTS_PER_MM,
    };

    /// Create a size in points
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size from millimeters
    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width: mm_to_pt(width_mm),
            height: mm_to_pt(height_mm),
        }
    }

    /// Both dimensions are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
