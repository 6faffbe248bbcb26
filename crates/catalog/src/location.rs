use serde::{Deserialize, Serialize};

use stockmap_core::{Entity, LocationId, ProductType, StorageType, ValueObject, Zone};

/// Coordinate of a location on the warehouse floor.
///
/// Opaque metadata for the rendering collaborator; nothing in the core
/// computes with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl ValueObject for Position {}

/// One physical storage slot.
///
/// `product_type == None` means the slot was never assigned a product and
/// must hold zero stock. `Some(product)` with `quantity == 0` is a
/// stock-out, which is a different condition. Both invariants are enforced
/// when a [`Catalog`](crate::Catalog) is ingested, not at construction, so
/// the record can double as the raw ingestion form supplied by the layout
/// generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub zone: Zone,
    pub storage_type: StorageType,
    pub product_type: Option<ProductType>,
    pub quantity: i64,
    pub capacity: Option<i64>,
    pub position: Position,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    pub fn is_filled(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_assigned(&self) -> bool {
        self.product_type.is_some()
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
