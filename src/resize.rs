//! # Image Resize Module
//!
//! Calcolo puro delle dimensioni di output: il lato lungo viene limitato a
//! `max_width` preservando l'aspect ratio, senza mai ingrandire.
//!
//! ```text
//! 2000x1000, max 1200  ->  1200x600
//! 1000x3000, max 1200  ->   400x1200
//!  800x600,  max 1200  ->   800x600   (già nel limite, invariata)
//! ```

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Longer of the two edges
    pub fn long_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Scale `source` so that neither edge exceeds `max_edge`.
///
/// Images already inside the bound come back unchanged. Otherwise the longer
/// edge becomes exactly `max_edge` and the shorter one is rounded, never
/// dropping below one pixel.
pub fn bounded_dimensions(source: Dimensions, max_edge: u32) -> Dimensions {
    let long_edge = source.long_edge();
    if long_edge <= max_edge || max_edge == 0 {
        return source;
    }

    let scale = |edge: u32| -> u32 {
        ((edge as f64 * max_edge as f64 / long_edge as f64).round() as u32).max(1)
    };

    if source.width >= source.height {
        Dimensions::new(max_edge, scale(source.height))
    } else {
        Dimensions::new(scale(source.width), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_is_bounded_on_width() {
        let out = bounded_dimensions(Dimensions::new(2000, 1000), 1200);
        assert_eq!(out, Dimensions::new(1200, 600));
    }

    #[test]
    fn test_portrait_is_bounded_on_height() {
        let out = bounded_dimensions(Dimensions::new(1000, 3000), 1200);
        assert_eq!(out, Dimensions::new(400, 1200));
    }

    #[test]
    fn test_square_over_bound() {
        let out = bounded_dimensions(Dimensions::new(5000, 5000), 1200);
        assert_eq!(out, Dimensions::new(1200, 1200));
    }

    #[test]
    fn test_never_upscales() {
        let small = Dimensions::new(800, 600);
        assert_eq!(bounded_dimensions(small, 1200), small);

        let exact = Dimensions::new(1200, 900);
        assert_eq!(bounded_dimensions(exact, 1200), exact);
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        let out = bounded_dimensions(Dimensions::new(10_000, 2), 100);
        assert_eq!(out, Dimensions::new(100, 1));
    }

    #[test]
    fn test_rounding_of_short_edge() {
        // 1999 * 1200 / 3001 = 799.33...
        let out = bounded_dimensions(Dimensions::new(1999, 3001), 1200);
        assert_eq!(out, Dimensions::new(799, 1200));
    }
}
