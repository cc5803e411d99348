//! Page viewports.
//!
//! A viewport maps a page's native coordinate space (PDF user space, origin
//! bottom-left, y up) onto canvas pixels at a given zoom and rotation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Matrix;

/// Letter-sized page box in PDF points.
pub const LETTER_VIEW_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// The page-to-canvas transform at a given zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Page box `[x0, y0, x1, y1]` in PDF points
    pub view_box: [f32; 4],
    /// Zoom factor
    pub scale: f32,
    /// Clockwise rotation in degrees (0, 90, 180 or 270)
    pub rotation: i32,
    /// Page space to canvas space
    pub transform: Matrix,
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
}

impl Viewport {
    /// Build the viewport for a page box at `scale` and `rotation` degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_highlight::viewport::Viewport;
    ///
    /// let vp = Viewport::new([0.0, 0.0, 612.0, 792.0], 2.0, 0).unwrap();
    /// assert_eq!(vp.width, 1224.0);
    /// assert_eq!(vp.transform.to_array(), [2.0, 0.0, 0.0, -2.0, 0.0, 1584.0]);
    /// ```
    pub fn new(view_box: [f32; 4], scale: f32, rotation: i32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        if rotation % 90 != 0 {
            return Err(Error::InvalidRotation(rotation));
        }
        let rotation = rotation.rem_euclid(360);

        let [x0, y0, x1, y1] = view_box;
        let center_x = (x1 + x0) / 2.0;
        let center_y = (y1 + y0) / 2.0;

        // Unit rotation including the y flip
        let (ra, rb, rc, rd) = match rotation {
            90 => (0.0, 1.0, 1.0, 0.0),
            180 => (-1.0, 0.0, 0.0, 1.0),
            270 => (0.0, -1.0, -1.0, 0.0),
            _ => (1.0, 0.0, 0.0, -1.0),
        };

        let (offset_x, offset_y, width, height) = if ra == 0.0 {
            (
                (center_y - y0).abs() * scale,
                (center_x - x0).abs() * scale,
                (y1 - y0).abs() * scale,
                (x1 - x0).abs() * scale,
            )
        } else {
            (
                (center_x - x0).abs() * scale,
                (center_y - y0).abs() * scale,
                (x1 - x0).abs() * scale,
                (y1 - y0).abs() * scale,
            )
        };

        let transform = Matrix::new(
            ra * scale,
            rb * scale,
            rc * scale,
            rd * scale,
            offset_x - ra * scale * center_x - rc * scale * center_y,
            offset_y - rb * scale * center_x - rd * scale * center_y,
        );

        Ok(Self {
            view_box,
            scale,
            rotation,
            transform,
            width,
            height,
        })
    }

    /// Same page box and rotation at another zoom.
    pub fn with_scale(&self, scale: f32) -> Result<Self> {
        Self::new(self.view_box, scale, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrotated_viewport_flips_y() {
        let vp = Viewport::new(LETTER_VIEW_BOX, 1.0, 0).unwrap();
        assert_eq!(vp.transform.to_array(), [1.0, 0.0, 0.0, -1.0, 0.0, 792.0]);
        assert_eq!((vp.width, vp.height), (612.0, 792.0));

        // Page top-left lands on canvas origin
        let p = vp.transform.transform_point(0.0, 792.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_offset_view_box() {
        let vp = Viewport::new([10.0, 20.0, 110.0, 220.0], 1.0, 0).unwrap();
        let p = vp.transform.transform_point(10.0, 220.0);
        assert!(p.x.abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert_eq!((vp.width, vp.height), (100.0, 200.0));
    }

    #[test]
    fn test_inverted_view_box_has_positive_canvas() {
        let vp = Viewport::new([612.0, 792.0, 0.0, 0.0], 2.0, 0).unwrap();
        assert_eq!((vp.width, vp.height), (1224.0, 1584.0));

        let vp = Viewport::new([612.0, 792.0, 0.0, 0.0], 1.0, 90).unwrap();
        assert_eq!((vp.width, vp.height), (792.0, 612.0));
    }

    #[test]
    fn test_rotated_viewport_swaps_dimensions() {
        let vp = Viewport::new(LETTER_VIEW_BOX, 1.0, 90).unwrap();
        assert_eq!((vp.width, vp.height), (792.0, 612.0));
        assert_eq!(vp.transform.to_array(), [0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);

        let vp = Viewport::new(LETTER_VIEW_BOX, 1.0, -90).unwrap();
        assert_eq!(vp.rotation, 270);
    }

    #[test]
    fn test_rotation_180() {
        let vp = Viewport::new(LETTER_VIEW_BOX, 1.0, 180).unwrap();
        // Page bottom-right lands on canvas origin
        let p = vp.transform.transform_point(612.0, 0.0);
        assert!(p.x.abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(Viewport::new(LETTER_VIEW_BOX, 0.0, 0), Err(Error::InvalidScale(_))));
        assert!(matches!(
            Viewport::new(LETTER_VIEW_BOX, f32::NAN, 0),
            Err(Error::InvalidScale(_))
        ));
        assert!(matches!(
            Viewport::new(LETTER_VIEW_BOX, 1.0, 45),
            Err(Error::InvalidRotation(45))
        ));
    }

    #[test]
    fn test_with_scale() {
        let vp = Viewport::new(LETTER_VIEW_BOX, 1.0, 0).unwrap();
        let zoomed = vp.with_scale(1.5).unwrap();
        assert_eq!(zoomed.width, 918.0);
        assert_eq!(zoomed.rotation, 0);
    }
}
