//! Grid snapping for the discrete drawing tools.

use kurbo::Point;

/// Grid pitch in raster units (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(
            snap_to_grid(Point::new(23.0, 47.0), GRID_SIZE),
            Point::new(20.0, 40.0)
        );
    }

    #[test]
    fn test_snap_to_grid_exact() {
        assert_eq!(
            snap_to_grid(Point::new(40.0, 60.0), GRID_SIZE),
            Point::new(40.0, 60.0)
        );
    }

    #[test]
    fn test_snap_to_grid_round_up() {
        assert_eq!(
            snap_to_grid(Point::new(31.0, 51.0), GRID_SIZE),
            Point::new(40.0, 60.0)
        );
    }

    #[test]
    fn test_snap_negative_coordinates() {
        assert_eq!(
            snap_to_grid(Point::new(-9.0, -11.0), GRID_SIZE),
            Point::new(-0.0, -20.0)
        );
    }
}
