mod stats;

pub use stats::SampleStats;

use crate::geometry::FloatType;

/// Linear RGB color, `1.0` maps to full intensity in the output image.
pub type Color = rgb::RGB<FloatType>;

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Color with all three components set to `value`.
pub fn gray(value: FloatType) -> Color {
    Color::new(value, value, value)
}

pub trait ColorExt {
    /// Component-wise product.
    fn product(&self, other: &Color) -> Color;
    fn scaled(&self, factor: FloatType) -> Color;
    /// True if every component is below `threshold`.
    fn lower_than(&self, threshold: FloatType) -> bool;
    /// Largest absolute difference over the three components.
    fn max_difference(&self, other: &Color) -> FloatType;
}

impl ColorExt for Color {
    fn product(&self, other: &Color) -> Color {
        Color::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    fn scaled(&self, factor: FloatType) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }

    fn lower_than(&self, threshold: FloatType) -> bool {
        self.r < threshold && self.g < threshold && self.b < threshold
    }

    fn max_difference(&self, other: &Color) -> FloatType {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

/// Mean of the colors, black for an empty input.
pub fn average(colors: impl IntoIterator<Item = Color>) -> Color {
    let (sum, count) = colors
        .into_iter()
        .fold((BLACK, 0usize), |(sum, count), c| (sum + c, count + 1));
    if count == 0 {
        BLACK
    } else {
        sum.scaled(1.0 / count as FloatType)
    }
}

/// Maps a linear color to pixel type compatible with module image.
pub fn color_to_image(color: Color) -> image::Rgb<u8> {
    image::Rgb([
        (color.r * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.g * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.b * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
