use super::CountyName;

/// Final county-to-district assignment, `assigned_district` in `0..num_districts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictAssignment {
    pub county_name: CountyName,
    pub assigned_district: u32,
}

impl DistrictAssignment {
    pub fn new(county_name: impl Into<CountyName>, assigned_district: u32) -> Self {
        Self { county_name: county_name.into(), assigned_district }
    }
}
