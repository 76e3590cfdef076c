use std::fmt::Display;

/// Number of primary rays traced per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleStats {
    pub pixels: usize,
    pub rays: usize,
    pub min: usize,
    pub max: usize,
}

impl SampleStats {
    pub fn add_pixel(&mut self, rays: usize) {
        self.pixels += 1;
        self.rays += rays;
        self.min = self.min.min(rays);
        self.max = self.max.max(rays);
    }

    pub fn merge(&self, other: &Self) -> Self {
        SampleStats {
            pixels: self.pixels + other.pixels,
            rays: self.rays + other.rays,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn average(&self) -> f64 {
        if self.pixels == 0 {
            0.0
        } else {
            self.rays as f64 / self.pixels as f64
        }
    }
}

impl Default for SampleStats {
    fn default() -> Self {
        SampleStats {
            pixels: 0,
            rays: 0,
            min: usize::MAX,
            max: 0,
        }
    }
}

impl Display for SampleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pixels == 0 {
            return write!(f, "no pixels");
        }
        write!(
            f,
            "{} - {} rays/pixel; avg {:.2}; {} rays over {} pixels",
            self.min,
            self.max,
            self.average(),
            self.rays,
            self.pixels
        )
    }
}
