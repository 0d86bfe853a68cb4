// Taxi route geometry
use crate::models::{ParkingKind, Point};
use crate::simulation::layout::lane_y;

/// L-shaped taxi route from `start` to `end` via the lane serving `kind`.
///
/// Emits the lane entry point, the lane point below/above the target, then
/// the target itself, skipping any leg that would not move the aircraft.
pub fn compute_taxi_path(start: Point, end: Point, kind: ParkingKind) -> Vec<Point> {
    let taxi_y = lane_y(kind);
    let mut path = Vec::with_capacity(3);

    if start.y != taxi_y {
        path.push(Point::new(start.x, taxi_y));
    }
    if start.x != end.x {
        path.push(Point::new(end.x, taxi_y));
    }
    if end.y != taxi_y {
        path.push(end);
    }

    path
}
