use crate::catalog::CatalogError;

/// One three-line catalog entry, kept exactly as it appeared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalElements {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl OrbitalElements {
    /// Name without the column padding used by three-line catalogs.
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }
}

/// Find the entry whose name line matches `name` and capture it together with
/// the two element lines that follow.
pub fn find_elements(catalog: &str, name: &str) -> Result<OrbitalElements, CatalogError> {
    let lines: Vec<&str> = catalog.lines().collect();
    let wanted = name.trim();

    let index = lines
        .iter()
        .position(|l| l.trim() == wanted)
        .ok_or_else(|| CatalogError::SatelliteNotFound(wanted.to_string()))?;

    match (lines.get(index + 1), lines.get(index + 2)) {
        (Some(line1), Some(line2)) => Ok(OrbitalElements {
            name: lines[index].to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
        }),
        _ => Err(CatalogError::TruncatedEntry(wanted.to_string())),
    }
}
