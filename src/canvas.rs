use image::{Rgba, RgbaImage};

use crate::dimensions::TextDimensions;
use crate::error::{Error, Result};
use crate::layout::{CellMetrics, Rect};

/// Optional upper bounds on the output size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeCaps {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// One spare column to the right of the widest line, one pitch per row, then capped.
    pub fn compute(dims: TextDimensions, metrics: CellMetrics, caps: SizeCaps) -> Self {
        let cols = u32::try_from(dims.cols).unwrap_or(u32::MAX);
        let rows = u32::try_from(dims.rows).unwrap_or(u32::MAX);

        let right = cols.saturating_add(1).saturating_mul(metrics.char_width);
        let bottom = rows.saturating_mul(metrics.row_pitch());

        Self {
            width: caps.max_width.map_or(right, |max| right.min(max)),
            height: caps.max_height.map_or(bottom, |max| bottom.min(max)),
        }
    }
}

/// Pixel buffer that rectangles are painted onto.
///
/// Starts fully transparent; a zero alpha marks a pixel no rectangle touched.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fails when the RGBA buffer for `size` cannot be addressed.
    pub fn new(size: CanvasSize) -> Result<Self> {
        let too_large = Error::CanvasTooLarge {
            width: size.width,
            height: size.height,
        };
        let bytes = usize::try_from(size.width)
            .ok()
            .zip(usize::try_from(size.height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|pixels| pixels.checked_mul(4));
        match bytes {
            Some(len) if len <= isize::MAX as usize => Ok(Self {
                image: RgbaImage::new(size.width, size.height),
            }),
            _ => Err(too_large),
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Fills the part of `rect` that lies on the canvas.
    pub fn paint(&mut self, rect: &Rect) {
        let x_end = rect.left.saturating_add(rect.width).min(self.image.width());
        let y_end = rect.top.saturating_add(rect.height).min(self.image.height());

        for y in rect.top..y_end {
            for x in rect.left..x_end {
                self.image.put_pixel(x, y, rect.color);
            }
        }
    }

    /// Gives every untouched pixel the background color and hands the image over.
    pub fn finish(mut self, background: Rgba<u8>) -> RgbaImage {
        for pixel in self.image.pixels_mut() {
            if pixel[3] == 0 {
                *pixel = background;
            }
        }
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BG: Rgba<u8> = Rgba([1, 2, 3, 255]);

    fn dims(rows: usize, cols: usize) -> TextDimensions {
        TextDimensions { rows, cols }
    }

    fn rect(left: u32, top: u32, width: u32, height: u32) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
            color: RED,
        }
    }

    #[test]
    fn size_from_text_dimensions() {
        let size = CanvasSize::compute(dims(3, 10), CellMetrics::default(), SizeCaps::default());
        assert_eq!(size, CanvasSize { width: 44, height: 15 });
    }

    #[test]
    fn caps_apply_only_when_smaller() {
        let caps = SizeCaps {
            max_width: Some(20),
            max_height: Some(100),
        };
        let size = CanvasSize::compute(dims(3, 10), CellMetrics::default(), caps);
        assert_eq!(size, CanvasSize { width: 20, height: 15 });

        let caps = SizeCaps {
            max_width: None,
            max_height: Some(7),
        };
        let size = CanvasSize::compute(dims(3, 10), CellMetrics::default(), caps);
        assert_eq!(size, CanvasSize { width: 44, height: 7 });
    }

    #[test]
    fn rect_is_clipped_to_bounds() {
        let mut canvas = Canvas::new(CanvasSize { width: 4, height: 3 }).unwrap();
        canvas.paint(&rect(2, 1, 10, 10));
        let image = canvas.finish(BG);

        for (x, y, pixel) in image.enumerate_pixels() {
            let inside = x >= 2 && y >= 1;
            assert_eq!(*pixel, if inside { RED } else { BG }, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn rect_outside_canvas_paints_nothing() {
        let mut canvas = Canvas::new(CanvasSize { width: 4, height: 3 }).unwrap();
        canvas.paint(&rect(4, 0, 2, 2));
        canvas.paint(&rect(0, 3, 2, 2));
        canvas.paint(&rect(u32::MAX, u32::MAX, u32::MAX, u32::MAX));
        let image = canvas.finish(BG);

        assert!(image.pixels().all(|p| *p == BG));
    }

    #[test]
    fn token_color_wins_over_background() {
        let mut canvas = Canvas::new(CanvasSize { width: 2, height: 2 }).unwrap();
        canvas.paint(&rect(0, 0, 1, 1));
        let image = canvas.finish(BG);

        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(1, 1), BG);
        assert!(image.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn zero_sized_canvas_is_allowed() {
        let canvas = Canvas::new(CanvasSize { width: 0, height: 0 }).unwrap();
        assert_eq!(canvas.size(), CanvasSize { width: 0, height: 0 });
        assert_eq!(canvas.finish(BG).len(), 0);
    }

    #[test]
    fn oversized_canvas_is_an_error() {
        let huge = CellMetrics {
            char_width: u32::MAX,
            char_height: u32::MAX,
        };
        let size = CanvasSize::compute(dims(1, 1), huge, SizeCaps::default());
        assert_eq!(size, CanvasSize { width: u32::MAX, height: u32::MAX });

        match Canvas::new(size) {
            Err(Error::CanvasTooLarge { width, height }) => {
                assert_eq!((width, height), (u32::MAX, u32::MAX))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("a u32::MAX square canvas must be rejected"),
        }
    }
}
