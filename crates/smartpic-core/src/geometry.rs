//! Size arithmetic shared by loading, reset and resize.

/// Fit `width` x `height` inside `max_width` x `max_height`, preserving the
/// aspect ratio. Images already inside the bound are returned unchanged.
///
/// The width is constrained first, then the height, so a result always
/// satisfies both bounds. Fractions are dropped, as assigning them to a
/// canvas size does. Each side is at least 1.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    let aspect = width as f64 / height as f64;
    let (mut w, mut h) = (width as f64, height as f64);

    if w > max_width as f64 {
        w = max_width as f64;
        h = w / aspect;
    }
    if h > max_height as f64 {
        h = max_height as f64;
        w = h * aspect;
    }

    ((w.floor() as u32).max(1), (h.floor() as u32).max(1))
}

/// Height matching `new_width` at the natural aspect ratio.
pub fn height_for_width(new_width: u32, natural_width: u32, natural_height: u32) -> u32 {
    if natural_width == 0 || natural_height == 0 {
        return new_width.max(1);
    }
    let aspect = natural_width as f64 / natural_height as f64;
    ((new_width as f64 / aspect).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_landscape() {
        assert_eq!(fit_within(1000, 500, 800, 600), (800, 400));
        assert_eq!(fit_within(4000, 3000, 800, 600), (800, 600));
    }

    #[test]
    fn test_fit_portrait() {
        assert_eq!(fit_within(600, 1200, 800, 600), (300, 600));
    }

    #[test]
    fn test_fit_height_bound_after_width() {
        // Width fits after the first step but height still overflows
        assert_eq!(fit_within(1000, 900, 800, 600), (666, 600));
    }

    #[test]
    fn test_fit_truncates_fractions() {
        // 800 / (1000 / 333) = 266.4
        assert_eq!(fit_within(1000, 333, 800, 600), (800, 266));
        // Height bound only: 600 * 0.7 = 420
        assert_eq!(fit_within(700, 1000, 800, 600), (420, 600));
    }

    #[test]
    fn test_fit_never_upscales() {
        assert_eq!(fit_within(320, 240, 800, 600), (320, 240));
        assert_eq!(fit_within(800, 600, 800, 600), (800, 600));
    }

    #[test]
    fn test_fit_extreme_aspect() {
        assert_eq!(fit_within(10_000, 1, 800, 600), (800, 1));
        assert_eq!(fit_within(1, 10_000, 800, 600), (1, 600));
    }

    #[test]
    fn test_height_for_width() {
        assert_eq!(height_for_width(400, 1000, 500), 200);
        assert_eq!(height_for_width(100, 640, 480), 75);
        assert_eq!(height_for_width(1, 1000, 10), 1);
    }
}
