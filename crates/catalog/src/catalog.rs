use std::collections::HashMap;

use stockmap_core::{DomainError, DomainResult, LocationId, TagRegistry};

use crate::location::Location;

/// The full set of storage locations at a point in time.
///
/// A catalog is immutable once ingested. Regeneration is a whole-value
/// swap performed by the caller; the core never patches a catalog field by
/// field. Lookup by id is O(1) amortized via an internal index.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locations: Vec<Location>,
    index: HashMap<LocationId, usize>,
}

impl Catalog {
    /// Validate and ingest a generator-supplied set of locations.
    ///
    /// All-or-nothing: the first schema violation rejects the whole batch.
    /// Checks, per the supplying collaborator's contract:
    /// - at least one location,
    /// - unique `location_id`,
    /// - `quantity >= 0`,
    /// - `capacity >= quantity` when capacity is present,
    /// - unassigned locations hold zero stock,
    /// - tags inside the configured registry.
    pub fn ingest(locations: Vec<Location>, registry: &TagRegistry) -> DomainResult<Catalog> {
        if locations.is_empty() {
            return Err(DomainError::schema("catalog must contain at least one location"));
        }

        let mut index = HashMap::with_capacity(locations.len());
        for (pos, location) in locations.iter().enumerate() {
            if location.quantity < 0 {
                return Err(DomainError::schema(format!(
                    "negative quantity {} at {}",
                    location.quantity, location.id
                )));
            }
            if let Some(capacity) = location.capacity {
                if capacity < location.quantity {
                    return Err(DomainError::schema(format!(
                        "capacity {} below quantity {} at {}",
                        capacity, location.quantity, location.id
                    )));
                }
            }
            if location.product_type.is_none() && location.quantity != 0 {
                return Err(DomainError::schema(format!(
                    "unassigned location {} holds stock",
                    location.id
                )));
            }
            registry.check_zone(&location.zone)?;
            registry.check_storage_type(&location.storage_type)?;
            if let Some(product_type) = &location.product_type {
                registry.check_product_type(product_type)?;
            }
            if index.insert(location.id.clone(), pos).is_some() {
                return Err(DomainError::schema(format!(
                    "duplicate location id: {}",
                    location.id
                )));
            }
        }

        let catalog = Catalog { locations, index };
        tracing::debug!(
            total = catalog.len(),
            filled = catalog.iter().filter(|l| l.is_filled()).count(),
            "catalog ingested"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.index.get(id).map(|&pos| &self.locations[pos])
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// All locations in ingestion order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Location;
    type IntoIter = core::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}
