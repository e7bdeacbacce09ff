use crate::catalog::{BeadId, Catalog, CatalogError};

/// Smallest loop that can be strung, whatever the sequence adds up to.
pub const MIN_CIRCUMFERENCE_MM: f64 = 120.0;

pub const MM_PER_INCH: f64 = 25.4;

pub fn width_of(catalog: &Catalog, id: &BeadId) -> Result<f64, CatalogError> {
    Ok(catalog.lookup(id)?.kind.along_loop_mm())
}

pub fn total_width(catalog: &Catalog, sequence: &[BeadId]) -> Result<f64, CatalogError> {
    sequence
        .iter()
        .try_fold(0.0, |sum, id| Ok::<_, CatalogError>(sum + width_of(catalog, id)?))
}

pub fn circumference_of(catalog: &Catalog, sequence: &[BeadId]) -> Result<f64, CatalogError> {
    Ok(total_width(catalog, sequence)?.max(MIN_CIRCUMFERENCE_MM))
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}
