use std::{collections::HashMap, io::Write, path::Path};

use anyhow::{Context, Result};
use geo::Centroid;

use crate::{
    io::svg::{
        SvgWriter, UNASSIGNED_FILL, combined_bounds, district_color, escape_text, fit_projection,
        multipolygon_to_path, write_svg_footer, write_svg_header, write_svg_styles,
    },
    types::{CountyName, DistrictAssignment},
};

use super::CountyBoundary;

/// Canvas and title settings for a district map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Canvas width in pixels; height follows the aspect ratio of the boundaries.
    pub width: f64,
    /// Blank border in pixels; the title sits inside the top margin.
    pub margin: f64,
    pub title: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self { width: 1000.0, margin: 40.0, title: "Ohio Congressional Districts".to_string() }
    }
}

/// What a render drew and what it could not match up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Counties drawn with a district fill.
    pub drawn: usize,
    /// Counties with geometry but no assignment (drawn gray).
    pub unassigned: Vec<CountyName>,
    /// Assignments with no matching geometry (not drawn).
    pub missing_geometry: Vec<CountyName>,
}

/// Render the district map as an SVG file at `path`.
pub fn render_district_map(assignments: &[DistrictAssignment], boundaries: &[CountyBoundary], path: &Path, options: &MapOptions) -> Result<RenderSummary> {
    let mut writer = SvgWriter::new(path)?;
    let summary = write_district_map(&mut writer, assignments, boundaries, options)?;
    writer.flush().with_context(|| format!("[render::map] Failed to write {}", path.display()))?;
    Ok(summary)
}

/// Render the district map as SVG into any writer.
///
/// Every boundary becomes one `<path>` filled by district, or gray without an assignment.
/// Assigned counties get their district number as a label at the centroid.
pub fn write_district_map<W: Write>(writer: &mut W, assignments: &[DistrictAssignment], boundaries: &[CountyBoundary], options: &MapOptions) -> Result<RenderSummary> {
    let bounds = combined_bounds(boundaries.iter().map(|b| &b.shape))
        .context("[render::map] No county geometry to draw")?;
    let (height, scale, project) = fit_projection(bounds, options.width, options.margin);

    let district_of: HashMap<&CountyName, u32> = assignments.iter()
        .map(|a| (&a.county_name, a.assigned_district))
        .collect();

    write_svg_header(writer, options.width, height, options.margin, scale, &bounds)?;
    write_svg_styles(writer)?;

    let mut summary = RenderSummary::default();
    let mut labels = Vec::new();

    writeln!(writer, r#"<g id="counties">"#)?;
    for boundary in boundaries {
        let d = multipolygon_to_path(&boundary.shape, &project);
        let name = escape_text(boundary.county_name.as_str());

        match district_of.get(&boundary.county_name) {
            Some(&district) => {
                writeln!(writer, r#"<path class="cty" data-county="{name}" data-district="{district}" fill="{}" d="{d}"/>"#, district_color(district))?;
                if let Some(center) = boundary.shape.centroid() {
                    labels.push((project(&center.0), district));
                }
                summary.drawn += 1;
            }
            None => {
                writeln!(writer, r#"<path class="cty" data-county="{name}" fill="{UNASSIGNED_FILL}" d="{d}"/>"#)?;
                summary.unassigned.push(boundary.county_name.clone());
            }
        }
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, r#"<g id="labels">"#)?;
    for ((x, y), district) in labels {
        writeln!(writer, r#"<text class="lbl" x="{x:.3}" y="{y:.3}">{district}</text>"#)?;
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, r#"<text class="ttl" x="{:.3}" y="{:.3}">{}</text>"#, options.width / 2.0, options.margin * 0.6, escape_text(&options.title))?;
    write_svg_footer(writer)?;

    let drawn: std::collections::HashSet<&CountyName> = boundaries.iter().map(|b| &b.county_name).collect();
    summary.missing_geometry = assignments.iter()
        .filter(|a| !drawn.contains(&a.county_name))
        .map(|a| a.county_name.clone())
        .collect();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn square(name: &str, x0: f64) -> CountyBoundary {
        let shape = MultiPolygon(vec![polygon![
            (x: x0, y: 0.0), (x: x0 + 1.0, y: 0.0), (x: x0 + 1.0, y: 1.0), (x: x0, y: 1.0), (x: x0, y: 0.0),
        ]]);
        CountyBoundary::new(name, shape)
    }

    fn render(assignments: &[DistrictAssignment], boundaries: &[CountyBoundary]) -> (String, RenderSummary) {
        let mut out = Vec::new();
        let summary = write_district_map(&mut out, assignments, boundaries, &MapOptions::default()).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn draws_each_county_once_with_its_district() {
        let (svg, summary) = render(
            &[DistrictAssignment::new("adams county", 0), DistrictAssignment::new("allen county", 1)],
            &[square("Adams County", 0.0), square("Allen County", 1.0)],
        );

        assert_eq!(summary, RenderSummary { drawn: 2, ..Default::default() });
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains(r#"data-county="adams county" data-district="0""#));
        assert!(svg.contains(&format!(r#"fill="{}""#, district_color(1))));
        assert!(svg.contains(r#"class="lbl""#));
        assert!(svg.contains("Ohio Congressional Districts"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn reports_unassigned_and_missing_counties() {
        let (svg, summary) = render(
            &[DistrictAssignment::new("adams county", 0), DistrictAssignment::new("athens county", 1)],
            &[square("Adams County", 0.0), square("Allen County", 1.0)],
        );

        assert_eq!(summary.drawn, 1);
        assert_eq!(summary.unassigned, vec![CountyName::new("allen county")]);
        assert_eq!(summary.missing_geometry, vec![CountyName::new("athens county")]);
        assert!(svg.contains(&format!(r#"fill="{UNASSIGNED_FILL}""#)));
    }

    #[test]
    fn no_geometry_is_an_error() {
        let mut out = Vec::new();
        assert!(write_district_map(&mut out, &[DistrictAssignment::new("adams county", 0)], &[], &MapOptions::default()).is_err());
    }

    #[test]
    fn writes_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        render_district_map(&[DistrictAssignment::new("adams county", 3)], &[square("Adams County", 0.0)], &path, &MapOptions::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(">3</text>"));
    }
}
