use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geo::MultiPolygon;

use crate::{io::shp, types::CountyName};

/// Ohio's state FIPS code.
pub const OHIO_FIPS: &str = "39";

/// One county outline, keyed by normalized county name.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyBoundary {
    pub county_name: CountyName,
    pub shape: MultiPolygon<f64>,
}

impl CountyBoundary {
    pub fn new(county_name: impl Into<CountyName>, shape: MultiPolygon<f64>) -> Self {
        Self { county_name: county_name.into(), shape }
    }
}

/// Anything that can produce the county outlines of one state.
pub trait BoundarySource {
    /// Fetch the boundaries of every county in the state with FIPS code `state_fips`.
    fn fetch(&self, state_fips: &str) -> Result<Vec<CountyBoundary>>;
}

/// A TIGER/Line county shapefile on disk.
///
/// Records are filtered on `STATEFP` and named by `NAMELSAD` ("Adams County").
#[derive(Debug, Clone)]
pub struct ShapefileBoundaries {
    path: PathBuf,
}

impl ShapefileBoundaries {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    #[inline] pub fn path(&self) -> &Path { &self.path }
}

impl BoundarySource for ShapefileBoundaries {
    fn fetch(&self, state_fips: &str) -> Result<Vec<CountyBoundary>> {
        let mut boundaries = Vec::new();
        for (shape, record) in shp::read_shapefile(&self.path)? {
            if shp::character_field(&record, "STATEFP")? != state_fips { continue }

            let name = shp::character_field(&record, "NAMELSAD")?;
            let shape = shp::shape_to_multipolygon(shape)
                .with_context(|| format!("[render::boundary] Bad geometry for {name}"))?;
            boundaries.push(CountyBoundary::new(name.as_str(), shape));
        }
        Ok(boundaries)
    }
}

/// The national TIGER/Line 2024 county layer, downloaded once into a cache directory.
#[cfg(feature = "download")]
#[derive(Debug, Clone)]
pub struct TigerBoundaries {
    cache_dir: PathBuf,
}

#[cfg(feature = "download")]
impl TigerBoundaries {
    const LAYER: &'static str = "tl_2024_us_county";
    const URL: &'static str = "https://www2.census.gov/geo/tiger/TIGER2024/COUNTY/tl_2024_us_county.zip";

    pub fn new(cache_dir: impl Into<PathBuf>) -> Self { Self { cache_dir: cache_dir.into() } }

    /// Make sure the layer is downloaded and extracted, returning the `.shp` path.
    pub fn ensure_downloaded(&self) -> Result<PathBuf> {
        use crate::common::{download_big_file, ensure_dir_exists, extract_zip, find_file_with_extension};

        let layer_dir = self.cache_dir.join(Self::LAYER);
        if let Ok(path) = find_file_with_extension(&layer_dir, "shp") {
            log::debug!("[download] using cached {}", path.display());
            return Ok(path);
        }

        ensure_dir_exists(&self.cache_dir)?;
        let zip_path = self.cache_dir.join(format!("{}.zip", Self::LAYER));

        log::info!("[download] {} -> {}", Self::URL, zip_path.display());
        download_big_file(Self::URL, &zip_path, true)?;

        log::info!("[extract] {} -> {}", zip_path.display(), layer_dir.display());
        extract_zip(&zip_path, &layer_dir, true)?;

        find_file_with_extension(&layer_dir, "shp")
    }
}

#[cfg(feature = "download")]
impl BoundarySource for TigerBoundaries {
    fn fetch(&self, state_fips: &str) -> Result<Vec<CountyBoundary>> {
        ShapefileBoundaries::new(self.ensure_downloaded()?).fetch(state_fips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_names_are_normalized() {
        let boundary = CountyBoundary::new("  Adams   County", MultiPolygon(vec![]));
        assert_eq!(boundary.county_name.as_str(), "adams county");
    }

    fn write_layer(path: &Path, counties: &[(&str, &str, f64)]) {
        use shapefile::{Point, Polygon, PolygonRing, dbase::{FieldValue, Record, TableWriterBuilder}};

        let table = TableWriterBuilder::new()
            .add_character_field("STATEFP".try_into().unwrap(), 2)
            .add_character_field("NAMELSAD".try_into().unwrap(), 40);
        let mut writer = shapefile::Writer::from_path(path, table).unwrap();

        for &(statefp, name, x0) in counties {
            let polygon = Polygon::new(PolygonRing::Outer(vec![
                Point::new(x0, 0.0),
                Point::new(x0, 1.0),
                Point::new(x0 + 1.0, 1.0),
                Point::new(x0 + 1.0, 0.0),
                Point::new(x0, 0.0),
            ]));
            let mut record = Record::default();
            record.insert("STATEFP".to_string(), FieldValue::Character(Some(statefp.to_string())));
            record.insert("NAMELSAD".to_string(), FieldValue::Character(Some(name.to_string())));
            writer.write_shape_and_record(&polygon, &record).unwrap();
        }
    }

    #[test]
    fn reads_only_the_requested_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counties.shp");
        write_layer(&path, &[("39", "Adams County", 0.0), ("21", "Adair County", 1.0), ("39", "Allen County", 2.0)]);

        let boundaries = ShapefileBoundaries::new(&path).fetch(OHIO_FIPS).unwrap();
        let names: Vec<&str> = boundaries.iter().map(|b| b.county_name.as_str()).collect();
        assert_eq!(names, vec!["adams county", "allen county"]);
        assert_eq!(boundaries[0].shape.0.len(), 1);
    }

    #[test]
    fn missing_shapefile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ShapefileBoundaries::new(dir.path().join("nothing.shp"));
        assert!(source.fetch(OHIO_FIPS).is_err());
    }
}
