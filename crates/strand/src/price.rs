use crate::catalog::{BeadId, Catalog, CatalogError};

pub const CORD_PRICE: f64 = 0.5;
pub const LABOR_PRICE: f64 = 10.0;

/// Price of the finished piece: every bead plus cord and labor, rounded to whole units.
pub fn total_price(catalog: &Catalog, sequence: &[BeadId]) -> Result<u64, CatalogError> {
    let beads = sequence
        .iter()
        .try_fold(0.0, |sum, id| Ok::<_, CatalogError>(sum + catalog.lookup(id)?.price))?;
    Ok((beads + CORD_PRICE + LABOR_PRICE).round() as u64)
}
