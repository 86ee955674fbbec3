mod assignment;
mod county;
mod name;

pub use assignment::DistrictAssignment;
pub use county::{AdjacencyRecord, CountyRecord, MergedCounty};
pub use name::CountyName;
