//! Read-only access to the POI catalog.
//!
//! The catalog is loaded once before any request is served and shared
//! immutably between requests; nothing in the engine writes to it.

use std::sync::Arc;

use crate::PointOfInterest;

/// Read-only sequence of points of interest.
///
/// Implementations must yield records in a stable order so that planning is
/// deterministic; ties in the pipeline are broken by this order.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use journeo_core::{MemoryCatalog, PoiCatalog, PointOfInterest};
///
/// let catalog = MemoryCatalog::with_pois([
///     PointOfInterest::new(0, "Thirumalai Nayakkar Mahal", "palace", Coord { x: 78.1232, y: 9.9149 }),
///     PointOfInterest::new(1, "Eco Park", "park", Coord { x: 78.1417, y: 9.9312 }),
/// ]);
///
/// let names: Vec<_> = catalog.pois().map(|poi| poi.name.as_str()).collect();
/// assert_eq!(names, ["Thirumalai Nayakkar Mahal", "Eco Park"]);
/// ```
pub trait PoiCatalog: Send + Sync {
    /// Iterate over every record in catalog order.
    fn pois(&self) -> Box<dyn Iterator<Item = &PointOfInterest> + '_>;
}

/// In-memory catalog backed by a shared slice.
///
/// Cloning is cheap: clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    pois: Arc<[PointOfInterest]>,
}

impl MemoryCatalog {
    /// Create a catalog containing a single point of interest.
    pub fn with_poi(poi: PointOfInterest) -> Self {
        Self::with_pois(std::iter::once(poi))
    }

    /// Create a catalog from a collection of points of interest.
    pub fn with_pois<I>(pois: I) -> Self
    where
        I: IntoIterator<Item = PointOfInterest>,
    {
        Self {
            pois: pois.into_iter().collect(),
        }
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Borrow the records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PointOfInterest] {
        &self.pois
    }
}

impl FromIterator<PointOfInterest> for MemoryCatalog {
    fn from_iter<T: IntoIterator<Item = PointOfInterest>>(iter: T) -> Self {
        Self::with_pois(iter)
    }
}

impl PoiCatalog for MemoryCatalog {
    fn pois(&self) -> Box<dyn Iterator<Item = &PointOfInterest> + '_> {
        Box::new(self.pois.iter())
    }
}

impl<C> PoiCatalog for Arc<C>
where
    C: PoiCatalog + ?Sized,
{
    fn pois(&self) -> Box<dyn Iterator<Item = &PointOfInterest> + '_> {
        (**self).pois()
    }
}
