//! Shapefile reading operations for county boundary layers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use shapefile::{self as shp, Reader, Shape, dbase::{FieldValue, Record}};

/// Reads all shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_shapefile(path: &Path) -> Result<Vec<(Shape, Record)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    reader.iter_shapes_and_records()
        .map(|result| result.context("[io::shp] Error reading shape+record"))
        .collect()
}

/// Get the trimmed value of a character field from a Record.
pub(crate) fn character_field(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        _ => bail!("[io::shp] missing or invalid character field: {}", field),
    }
}

/// Convert a polygon shape into a geo::MultiPolygon<f64>, rejecting every other shape type.
pub(crate) fn shape_to_multipolygon(shape: Shape) -> Result<geo::MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(polygon) => Ok(shp_to_geo(&polygon)),
        other => bail!("[io::shp] found non-Polygon shape in layer: {:?}", other.shapetype()),
    }
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>
fn shp_to_geo(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<geo::Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
    }

    /// Get the signed area of a geo::Coord list (negative for clockwise)
    fn signed_area(pts: &[geo::Coord<f64>]) -> f64 {
        pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
    }

    // Shapefile stores each clockwise exterior ring followed by its counter-clockwise holes.
    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut coords: Vec<geo::Coord<f64>> = ring.points().iter().map(|pt| geo::Coord { x: pt.x, y: pt.y }).collect();
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        let ls = geo::LineString(coords);

        if is_exterior {
            if let Some(ext) = exterior.take() {
                polys.push(geo::Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ls);
        } else {
            holes.push(ls);
        }
    }
    if let Some(ext) = exterior {
        polys.push(geo::Polygon::new(ext, holes));
    }

    geo::MultiPolygon(polys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::{Point, PolygonRing};

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ]
    }

    #[test]
    fn outer_ring_with_hole_becomes_one_polygon() {
        let polygon = shp::Polygon::with_rings(vec![
            PolygonRing::Outer(square(0.0, 0.0, 10.0)),
            PolygonRing::Inner(square(2.0, 2.0, 2.0)),
        ]);

        let mp = shape_to_multipolygon(Shape::Polygon(polygon)).unwrap();
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn two_outer_rings_become_two_polygons() {
        let polygon = shp::Polygon::with_rings(vec![
            PolygonRing::Outer(square(0.0, 0.0, 1.0)),
            PolygonRing::Outer(square(5.0, 5.0, 1.0)),
        ]);

        let mp = shape_to_multipolygon(Shape::Polygon(polygon)).unwrap();
        assert_eq!(mp.0.len(), 2);
    }

    #[test]
    fn rejects_point_shapes() {
        assert!(shape_to_multipolygon(Shape::Point(Point::new(0.0, 0.0))).is_err());
    }
}
