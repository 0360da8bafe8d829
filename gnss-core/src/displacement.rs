//! Displacement arrows for co/post-seismic station motion.
//!
//! Arrow geometry is computed in screen pixels and projected back to map
//! coordinates by a [`MapHost`]. Lengths come from a fixed visualization
//! table rather than a unit conversion, so arrows stay legible at any zoom.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Arrowhead half-angle, 30 degrees.
pub const HEAD_ANGLE: f64 = PI / 6.0;

/// Arrowhead length relative to the main arrow.
pub const HEAD_RATIO: f64 = 0.1;

/// `(upper bound of real magnitude, arrow length in pixels)`, checked in
/// order, upper bound inclusive. Past 5 the lengths are not monotonic.
pub const ARROW_LENGTH_TABLE: [(f64, f64); 10] = [
    (1.0, 100.0),
    (1.5, 150.0),
    (1.75, 200.0),
    (2.0, 250.0),
    (2.5, 300.0),
    (3.0, 350.0),
    (5.0, 400.0),
    (7.0, 600.0),
    (9.0, 450.0),
    (10.0, 500.0),
];

/// Length used above the last breakpoint.
pub const ARROW_LENGTH_MAX: f64 = 600.0;

/// Screen position in container pixels; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        PixelPoint { x, y }
    }

    /// Offset by `length` along a bearing (0 = up/north, clockwise).
    fn along(&self, angle: f64, length: f64) -> PixelPoint {
        PixelPoint {
            x: self.x + length * angle.sin(),
            y: self.y - length * angle.cos(),
        }
    }
}

/// A straight stroke between two pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: PixelPoint,
    pub to: PixelPoint,
}

/// Everything needed to draw one arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    pub main_line: Segment,
    pub left_head: Segment,
    pub right_head: Segment,
    pub main_weight: f64,
    pub head_weight: f64,
}

/// Station displacement in meters, with the scalar magnitude that drives
/// stroke weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplacementVector {
    pub origin: GeoPoint,
    pub north_m: f64,
    pub east_m: f64,
    pub magnitude: f64,
}

impl DisplacementVector {
    pub fn real_magnitude(&self) -> f64 {
        real_magnitude(self.north_m, self.east_m)
    }

    pub fn angle(&self) -> f64 {
        vector_angle(self.north_m, self.east_m)
    }
}

pub fn real_magnitude(north: f64, east: f64) -> f64 {
    (north * north + east * east).sqrt()
}

/// Bearing of the displacement: 0 points north, positive turns east.
pub fn vector_angle(north: f64, east: f64) -> f64 {
    east.atan2(north)
}

/// Pick the arrow length for a real magnitude from [`ARROW_LENGTH_TABLE`].
pub fn arrow_length_px(real_magnitude: f64) -> f64 {
    ARROW_LENGTH_TABLE
        .iter()
        .find(|(upper, _)| real_magnitude <= *upper)
        .map(|(_, length)| *length)
        .unwrap_or(ARROW_LENGTH_MAX)
}

pub fn main_stroke_weight(magnitude: f64) -> f64 {
    (magnitude / 2.0).clamp(2.0, 6.0)
}

pub fn head_stroke_weight(magnitude: f64) -> f64 {
    (magnitude / 3.0).clamp(1.0, 4.0)
}

/// Compute the arrow for a displacement drawn from `origin`.
pub fn compute_arrow(origin: PixelPoint, north: f64, east: f64, magnitude: f64) -> ArrowGeometry {
    let length = arrow_length_px(real_magnitude(north, east));
    let angle = vector_angle(north, east);
    let end = origin.along(angle, length);
    let head_length = length * HEAD_RATIO;

    ArrowGeometry {
        main_line: Segment { from: origin, to: end },
        left_head: Segment {
            from: end,
            to: end.along(angle + HEAD_ANGLE, -head_length),
        },
        right_head: Segment {
            from: end,
            to: end.along(angle - HEAD_ANGLE, -head_length),
        },
        main_weight: main_stroke_weight(magnitude),
        head_weight: head_stroke_weight(magnitude),
    }
}

/// Handle to a layer added to a map host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Stroke style for a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub weight: f64,
}

/// The pan/zoom map an overlay is drawn on.
///
/// Projection returns `None` while the map is not ready.
pub trait MapHost {
    fn lat_lng_to_container_point(&self, point: GeoPoint) -> Option<PixelPoint>;
    fn container_point_to_lat_lng(&self, pixel: PixelPoint) -> Option<GeoPoint>;
    fn add_polyline(&mut self, points: &[GeoPoint], style: &StrokeStyle) -> Option<LayerId>;
    fn remove_layer(&mut self, layer: LayerId);
}

/// A displacement arrow overlay that owns the layers it has drawn.
///
/// Each [`redraw`](DisplacementArrow::redraw) removes the previous strokes
/// before adding new ones, so repeated calls never stack overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementArrow {
    vector: DisplacementVector,
    color: String,
    layers: Vec<LayerId>,
}

impl DisplacementArrow {
    pub fn new(vector: DisplacementVector, color: impl Into<String>) -> Self {
        DisplacementArrow {
            vector,
            color: color.into(),
            layers: Vec::new(),
        }
    }

    pub fn vector(&self) -> &DisplacementVector {
        &self.vector
    }

    /// Layers currently on the map.
    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    /// Replace the displacement. The caller redraws afterwards.
    pub fn set_vector(&mut self, vector: DisplacementVector) {
        self.vector = vector;
    }

    /// Remove every stroke this arrow has drawn.
    pub fn clear<H: MapHost>(&mut self, host: &mut H) {
        for layer in self.layers.drain(..) {
            host.remove_layer(layer);
        }
    }

    /// Recompute the arrow for the host's current view and draw it,
    /// replacing whatever was drawn before. Returns the geometry drawn, or
    /// `None` when the host could not project.
    pub fn redraw<H: MapHost>(&mut self, host: &mut H) -> Option<ArrowGeometry> {
        self.clear(host);

        let origin = host.lat_lng_to_container_point(self.vector.origin)?;
        let geometry = compute_arrow(
            origin,
            self.vector.north_m,
            self.vector.east_m,
            self.vector.magnitude,
        );

        let strokes = [
            (geometry.main_line, geometry.main_weight),
            (geometry.left_head, geometry.head_weight),
            (geometry.right_head, geometry.head_weight),
        ];
        for (segment, weight) in strokes {
            let (Some(from), Some(to)) = (
                host.container_point_to_lat_lng(segment.from),
                host.container_point_to_lat_lng(segment.to),
            ) else {
                log::warn!("Map host could not unproject arrow segment");
                self.clear(host);
                return None;
            };
            let style = StrokeStyle {
                color: self.color.clone(),
                weight,
            };
            if let Some(layer) = host.add_polyline(&[from, to], &style) {
                self.layers.push(layer);
            }
        }
        Some(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const EPS: f64 = 1e-9;

    /// Flat projection: one degree is 100 pixels, north is up.
    #[derive(Default)]
    struct FakeMap {
        offset: PixelPoint,
        next_id: u32,
        layers: HashMap<LayerId, (Vec<GeoPoint>, StrokeStyle)>,
        removed: Vec<LayerId>,
    }

    impl MapHost for FakeMap {
        fn lat_lng_to_container_point(&self, point: GeoPoint) -> Option<PixelPoint> {
            Some(PixelPoint::new(
                point.lon * 100.0 + self.offset.x,
                -point.lat * 100.0 + self.offset.y,
            ))
        }

        fn container_point_to_lat_lng(&self, pixel: PixelPoint) -> Option<GeoPoint> {
            Some(GeoPoint::new(
                -(pixel.y - self.offset.y) / 100.0,
                (pixel.x - self.offset.x) / 100.0,
            ))
        }

        fn add_polyline(&mut self, points: &[GeoPoint], style: &StrokeStyle) -> Option<LayerId> {
            self.next_id += 1;
            let id = LayerId(self.next_id);
            self.layers.insert(id, (points.to_vec(), style.clone()));
            Some(id)
        }

        fn remove_layer(&mut self, layer: LayerId) {
            self.layers.remove(&layer);
            self.removed.push(layer);
        }
    }

    struct UnreadyMap;

    impl MapHost for UnreadyMap {
        fn lat_lng_to_container_point(&self, _point: GeoPoint) -> Option<PixelPoint> {
            None
        }
        fn container_point_to_lat_lng(&self, _pixel: PixelPoint) -> Option<GeoPoint> {
            None
        }
        fn add_polyline(&mut self, _points: &[GeoPoint], _style: &StrokeStyle) -> Option<LayerId> {
            None
        }
        fn remove_layer(&mut self, _layer: LayerId) {}
    }

    fn vector(north_m: f64, east_m: f64, magnitude: f64) -> DisplacementVector {
        DisplacementVector {
            origin: GeoPoint::new(0.0, 0.0),
            north_m,
            east_m,
            magnitude,
        }
    }

    #[test]
    fn test_breakpoint_selection() {
        assert_eq!(arrow_length_px(0.5), 100.0);
        assert_eq!(arrow_length_px(1.0), 100.0);
        assert_eq!(arrow_length_px(1.2), 150.0);
        assert_eq!(arrow_length_px(1.6), 200.0);
        assert_eq!(arrow_length_px(1.75), 200.0);
        assert_eq!(arrow_length_px(4.0), 400.0);
        assert_eq!(arrow_length_px(6.0), 600.0);
        assert_eq!(arrow_length_px(8.0), 450.0);
        assert_eq!(arrow_length_px(9.5), 500.0);
        assert_eq!(arrow_length_px(42.0), ARROW_LENGTH_MAX);
    }

    #[test]
    fn test_angle_convention() {
        assert_eq!(vector_angle(1.0, 0.0), 0.0);
        assert!((vector_angle(0.0, 1.0) - PI / 2.0).abs() < EPS);
        assert!((vector_angle(-1.0, 0.0).abs() - PI).abs() < EPS);
    }

    #[test]
    fn test_north_arrow_points_up() {
        let arrow = compute_arrow(PixelPoint::new(200.0, 300.0), 1.0, 0.0, 4.0);
        assert_eq!(arrow.main_line.from, PixelPoint::new(200.0, 300.0));
        assert!((arrow.main_line.to.x - 200.0).abs() < EPS);
        assert!((arrow.main_line.to.y - 200.0).abs() < EPS);
    }

    #[test]
    fn test_east_arrow_points_right() {
        let arrow = compute_arrow(PixelPoint::new(0.0, 0.0), 0.0, 1.2, 4.0);
        assert!((arrow.main_line.to.x - 150.0).abs() < EPS);
        assert!(arrow.main_line.to.y.abs() < EPS);
    }

    #[test]
    fn test_arrowheads_fold_back_symmetrically() {
        let arrow = compute_arrow(PixelPoint::new(0.0, 0.0), 1.0, 0.0, 4.0);
        let end = arrow.main_line.to;
        let head_length = 100.0 * HEAD_RATIO;
        for head in [arrow.left_head, arrow.right_head] {
            assert_eq!(head.from, end);
            let dx = head.to.x - end.x;
            let dy = head.to.y - end.y;
            assert!(((dx * dx + dy * dy).sqrt() - head_length).abs() < EPS);
            // heads trail back toward the origin
            assert!(head.to.y > end.y);
        }
        assert!((arrow.left_head.to.x + arrow.right_head.to.x - 2.0 * end.x).abs() < EPS);
        assert!((arrow.left_head.to.x - (end.x - head_length * HEAD_ANGLE.sin())).abs() < EPS);
    }

    #[test]
    fn test_left_head_on_screen_left_of_shaft() {
        // pointing up, left is smaller x
        let up = compute_arrow(PixelPoint::new(0.0, 0.0), 1.0, 0.0, 4.0);
        assert!(up.left_head.to.x < up.main_line.to.x);
        assert!(up.right_head.to.x > up.main_line.to.x);

        // pointing right, left is smaller y
        let right = compute_arrow(PixelPoint::new(0.0, 0.0), 0.0, 1.0, 4.0);
        assert!(right.left_head.to.y < right.main_line.to.y);
        assert!(right.right_head.to.y > right.main_line.to.y);
    }

    #[test]
    fn test_stroke_weights_clamped() {
        assert_eq!(main_stroke_weight(1.0), 2.0);
        assert_eq!(main_stroke_weight(8.0), 4.0);
        assert_eq!(main_stroke_weight(20.0), 6.0);
        assert_eq!(head_stroke_weight(1.0), 1.0);
        assert_eq!(head_stroke_weight(6.0), 2.0);
        assert_eq!(head_stroke_weight(30.0), 4.0);
    }

    #[test]
    fn test_redraw_replaces_previous_layers() {
        let mut map = FakeMap::default();
        let mut arrow = DisplacementArrow::new(vector(1.0, 0.0, 4.0), "red");

        arrow.redraw(&mut map).unwrap();
        assert_eq!(map.layers.len(), 3);
        let first: Vec<LayerId> = arrow.layers().to_vec();

        arrow.redraw(&mut map).unwrap();
        assert_eq!(map.layers.len(), 3);
        assert_eq!(map.removed, first);
        assert!(first.iter().all(|id| !arrow.layers().contains(id)));
    }

    #[test]
    fn test_redraw_follows_pan() {
        let mut map = FakeMap::default();
        let mut arrow = DisplacementArrow::new(vector(1.0, 0.0, 12.0), "red");
        let before = arrow.redraw(&mut map).unwrap();

        map.offset = PixelPoint::new(50.0, 25.0);
        let after = arrow.redraw(&mut map).unwrap();
        assert!((after.main_line.from.x - before.main_line.from.x - 50.0).abs() < EPS);
        assert!((after.main_line.from.y - before.main_line.from.y - 25.0).abs() < EPS);

        let main = arrow.layers()[0];
        let (points, style) = &map.layers[&main];
        assert_eq!(style.weight, 6.0);
        // 100 px north of the origin is one degree of latitude
        assert!((points[1].lat - 1.0).abs() < EPS);
        assert!(points[1].lon.abs() < EPS);
    }

    #[test]
    fn test_redraw_after_vector_change() {
        let mut map = FakeMap::default();
        let mut arrow = DisplacementArrow::new(vector(1.0, 0.0, 4.0), "red");
        arrow.redraw(&mut map);
        arrow.set_vector(vector(0.0, 1.0, 4.0));
        let geometry = arrow.redraw(&mut map).unwrap();
        assert!((geometry.main_line.to.x - 100.0).abs() < EPS);
        assert_eq!(map.layers.len(), 3);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut map = FakeMap::default();
        let mut arrow = DisplacementArrow::new(vector(1.0, 0.0, 4.0), "red");
        arrow.redraw(&mut map);
        arrow.clear(&mut map);
        assert!(map.layers.is_empty());
        assert!(arrow.layers().is_empty());
    }

    #[test]
    fn test_redraw_on_unready_map_draws_nothing() {
        let mut arrow = DisplacementArrow::new(vector(1.0, 0.0, 4.0), "red");
        assert!(arrow.redraw(&mut UnreadyMap).is_none());
        assert!(arrow.layers().is_empty());
    }
}
