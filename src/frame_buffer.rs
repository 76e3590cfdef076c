use std::num::NonZeroU32;

use image::RgbImage;

use crate::{
    geometry::ScreenSize,
    util::{Color, color_to_image},
};

/// Destination of a finished image, one pixel at a time.
pub trait ImageSink {
    fn write_pixel(&mut self, col: u32, row: u32, color: Color);
}

impl ImageSink for RgbImage {
    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.put_pixel(col, row, color_to_image(color));
    }
}

/// Linear colors of a rendered frame, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    size: ScreenSize,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Panics if the rows do not exactly cover `size`.
    pub(crate) fn from_rows(
        size: ScreenSize,
        rows: impl IntoIterator<Item = Box<[Color]>>,
    ) -> Self {
        let mut pixels = Vec::with_capacity(size.x as usize * size.y as usize);
        for row in rows {
            assert_eq!(row.len(), size.x as usize);
            pixels.extend_from_slice(&row);
        }
        assert_eq!(pixels.len(), size.x as usize * size.y as usize);
        FrameBuffer { size, pixels }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn pixel(&self, col: u32, row: u32) -> Color {
        self.pixels[row as usize * self.size.x as usize + col as usize]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.size.x as usize)
    }

    /// Paints every `interval`-th row and column with `color`, starting at the top left pixel.
    pub fn draw_grid(&mut self, interval: NonZeroU32, color: Color) {
        let interval = interval.get() as usize;
        let width = self.size.x as usize;
        for (row, pixels) in self.pixels.chunks_exact_mut(width).enumerate() {
            for (col, pixel) in pixels.iter_mut().enumerate() {
                if row % interval == 0 || col % interval == 0 {
                    *pixel = color;
                }
            }
        }
    }

    /// Calls `sink.write_pixel` exactly once for every pixel, in row-major order.
    pub fn write_to(&self, sink: &mut impl ImageSink) {
        for (row, pixels) in (0..).zip(self.rows()) {
            for (col, color) in (0..).zip(pixels) {
                sink.write_pixel(col, row, *color);
            }
        }
    }

    pub fn to_image(&self) -> RgbImage {
        let mut image = RgbImage::new(self.size.x, self.size.y);
        self.write_to(&mut image);
        image
    }
}
