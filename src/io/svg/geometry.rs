//! Projection and path helpers for SVG generation.

use geo::{BoundingRect, Coord, CoordsIter, LineString, MultiPolygon, Rect};

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Fit `bounds` into a canvas `width` pixels wide with `margin` on every side.
/// Returns the canvas height, the scale, and the lon/lat -> SVG projection (Y down).
pub(crate) fn fit_projection(bounds: Rect<f64>, width: f64, margin: f64) -> (f64, f64, impl Fn(&Coord<f64>) -> (f64, f64)) {
    // a zero-width extent (single point or vertical line) still gets a finite scale
    let scale = (width - 2.0 * margin) / bounds.width().max(f64::EPSILON);
    let height = bounds.height() * scale + 2.0 * margin;

    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = margin + (bounds.max().y - coord.y) * scale;
        (x, y)
    };

    (height, scale, project)
}

/// Union of the bounding boxes of all shapes, or `None` if there is nothing to draw.
pub(crate) fn combined_bounds<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Option<Rect<f64>> {
    shapes.into_iter()
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();
    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), project, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, project, &mut out);
        }
    }
    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, project: &Projection, out: &mut String) {
    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn unit_square(x: f64, y: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y), (x: x + 1.0, y: y), (x: x + 1.0, y: y + 1.0), (x: x, y: y + 1.0), (x: x, y: y),
        ]])
    }

    #[test]
    fn combined_bounds_covers_all_shapes() {
        let shapes = [unit_square(0.0, 0.0), unit_square(3.0, -2.0)];
        let bounds = combined_bounds(&shapes).unwrap();
        assert_eq!(bounds.min(), Coord { x: 0.0, y: -2.0 });
        assert_eq!(bounds.max(), Coord { x: 4.0, y: 1.0 });
    }

    #[test]
    fn combined_bounds_of_nothing_is_none() {
        assert!(combined_bounds(&[] as &[MultiPolygon<f64>]).is_none());
    }

    #[test]
    fn projection_flips_y_and_applies_margin() {
        let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 5.0 });
        let (height, scale, project) = fit_projection(bounds, 120.0, 10.0);
        assert_eq!(scale, 10.0);
        assert_eq!(height, 70.0);
        assert_eq!(project(&Coord { x: 0.0, y: 5.0 }), (10.0, 10.0));
        assert_eq!(project(&Coord { x: 10.0, y: 0.0 }), (110.0, 60.0));
    }

    #[test]
    fn path_has_one_subpath_per_ring() {
        let project = |c: &Coord<f64>| (c.x, c.y);
        let path = multipolygon_to_path(&unit_square(0.0, 0.0), &project);
        assert!(path.starts_with(" M0.000,0.000"));
        assert_eq!(path.matches('Z').count(), 1);
    }
}
