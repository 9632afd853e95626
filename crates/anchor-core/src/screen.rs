//! Screen space - query points and viewport conversion

use crate::{AnchorError, AnchorResult};

/// 2D point in normalized device coordinates.
///
/// Both axes span `[-1, 1]`, +Y up, `(0, 0)` is the screen centre.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const CENTER: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Is this point on screen?
    pub fn is_in_range(&self) -> bool {
        (-1.0..=1.0).contains(&self.x) && (-1.0..=1.0).contains(&self.y)
    }

    /// Reject points outside the NDC square
    pub fn validate(self) -> AnchorResult<Self> {
        if self.is_in_range() {
            Ok(self)
        } else {
            Err(AnchorError::ScreenPointOutOfRange {
                x: self.x,
                y: self.y,
            })
        }
    }
}

/// Viewport size in pixels (origin top-left, +Y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> AnchorResult<Self> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(AnchorError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pixel midpoint of the viewport
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    pub fn to_ndc(&self, px: f32, py: f32) -> ScreenPoint {
        ScreenPoint {
            x: px / self.width * 2.0 - 1.0,
            y: 1.0 - py / self.height * 2.0,
        }
    }

    pub fn from_ndc(&self, point: ScreenPoint) -> (f32, f32) {
        (
            (point.x + 1.0) * 0.5 * self.width,
            (1.0 - point.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_ndc_origin() {
        let vp = Viewport::new(1170.0, 2532.0).unwrap();
        let (cx, cy) = vp.center();
        assert_eq!(vp.to_ndc(cx, cy), ScreenPoint::CENTER);
        assert_eq!(vp.from_ndc(ScreenPoint::CENTER), (585.0, 1266.0));
    }

    #[test]
    fn test_ndc_axes() {
        let vp = Viewport::new(200.0, 100.0).unwrap();
        assert_eq!(vp.to_ndc(0.0, 0.0), ScreenPoint::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(200.0, 100.0), ScreenPoint::new(1.0, -1.0));
    }

    #[test]
    fn test_invalid_viewport() {
        assert_eq!(
            Viewport::new(0.0, 10.0),
            Err(AnchorError::InvalidViewport {
                width: 0.0,
                height: 10.0
            })
        );
        assert!(Viewport::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_screen_point_validation() {
        assert!(ScreenPoint::CENTER.validate().is_ok());
        assert!(ScreenPoint::new(1.0, -1.0).validate().is_ok());
        assert!(matches!(
            ScreenPoint::new(1.5, 0.0).validate(),
            Err(AnchorError::ScreenPointOutOfRange { .. })
        ));
    }
}
