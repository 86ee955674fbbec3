use std::fmt;

use crate::types::CountyName;

/// A problem in the merged tables that would corrupt the contiguity constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// A populated county has no adjacency entry at all.
    MissingAdjacency { county: CountyName },
    /// An adjacency entry names a county absent from the population table.
    OrphanAdjacency { county: CountyName },
    /// A neighbor reference does not resolve to a populated county.
    UnknownNeighbor { county: CountyName, neighbor: CountyName },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::MissingAdjacency { county } =>
                write!(f, "county '{county}' has population data but no adjacency entry"),
            IntegrityIssue::OrphanAdjacency { county } =>
                write!(f, "adjacency entry '{county}' has no population data"),
            IntegrityIssue::UnknownNeighbor { county, neighbor } =>
                write!(f, "county '{county}' lists unknown neighbor '{neighbor}'"),
        }
    }
}

/// All integrity issues found in a merged table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// Every issue kind blocks model construction, so a report is usable only when clean.
    #[inline] pub fn is_clean(&self) -> bool { self.issues.is_empty() }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} integrity issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for IntegrityReport {}
