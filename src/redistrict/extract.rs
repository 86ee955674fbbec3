use crate::types::CountyName;

use super::ExtractionFault;

/// Values within this distance of 0 or 1 count as integral.
pub(crate) const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Read one district per county out of the solved `x[i][j]` values.
///
/// A county is in district `j` when `x[i][j] >= 1 - 1e-6`. Anything other than exactly one such
/// district, with every other value at 0, is reported as a fault for that county.
pub(crate) fn extract_districts(names: &[CountyName], values: &[Vec<f64>]) -> Result<Vec<u32>, ExtractionFault> {
    names.iter().zip(values).map(|(name, row)| {
        let selected: Vec<u32> = row.iter().enumerate()
            .filter(|&(_, &v)| v >= 1.0 - INTEGRALITY_TOLERANCE)
            .map(|(j, _)| j as u32)
            .collect();
        let fractional: Vec<(u32, f64)> = row.iter().enumerate()
            .filter(|&(_, &v)| v > INTEGRALITY_TOLERANCE && v < 1.0 - INTEGRALITY_TOLERANCE)
            .map(|(j, &v)| (j as u32, v))
            .collect();

        match selected.as_slice() {
            &[district] if fractional.is_empty() => Ok(district),
            _ => Err(ExtractionFault { county: name.clone(), selected, fractional }),
        }
    }).collect()
}
