//! Deterministic demo warehouse layout.
//!
//! Stands in for the external layout generator during tests, benchmarks,
//! and demos: zone-configured grids of slots (rows x cols x depth), a
//! receiving-dock zone of always-empty locations, and seeded quantities so
//! two runs with the same seed produce the same catalog.

use stockmap_core::{DomainResult, LocationId, ProductType, StorageType, TagRegistry, Zone};

use crate::catalog::Catalog;
use crate::location::{Location, Position};

/// Grid configuration for one zone.
#[derive(Debug, Clone)]
pub struct ZoneSpec {
    pub zone: &'static str,
    pub product: &'static str,
    pub storage: &'static str,
    pub rows: u32,
    pub cols: u32,
    pub depth: u32,
    pub origin: (f64, f64),
}

/// The demo floor plan: a clothing warehouse cut down to a handful of
/// zones. Shelf capacity is uniform; quantities are seeded per slot.
pub fn demo_zone_specs() -> Vec<ZoneSpec> {
    vec![
        ZoneSpec { zone: "A", product: "T-shirts", storage: "Folded Shelves", rows: 2, cols: 8, depth: 2, origin: (10.0, 70.0) },
        ZoneSpec { zone: "B", product: "Jeans", storage: "Folded Shelves", rows: 2, cols: 8, depth: 2, origin: (10.0, 60.0) },
        ZoneSpec { zone: "C", product: "Dresses", storage: "Hanging Racks", rows: 2, cols: 6, depth: 2, origin: (10.0, 50.0) },
        ZoneSpec { zone: "F", product: "Shoes", storage: "Shoe Racks", rows: 2, cols: 6, depth: 1, origin: (10.0, 20.0) },
        ZoneSpec { zone: "K", product: "Premium Apparel", storage: "Secure Storage", rows: 3, cols: 4, depth: 1, origin: (60.0, 20.0) },
        ZoneSpec { zone: "P", product: "Sale Items", storage: "Sale Racks", rows: 3, cols: 3, depth: 1, origin: (70.0, 60.0) },
    ]
}

const DEMO_CAPACITY: i64 = 24;
const DOCK_SLOTS: u32 = 5;

/// Build the demo location set for a seed. Roughly a third of the slots
/// are empty (unassigned or stocked out), the rest hold 1..=20 units.
pub fn demo_locations(seed: u64) -> DomainResult<Vec<Location>> {
    let mut rng = SplitMix(seed);
    let mut locations = Vec::new();

    for spec in demo_zone_specs() {
        let zone = Zone::new(spec.zone)?;
        let product = ProductType::new(spec.product)?;
        let storage = StorageType::new(spec.storage)?;

        for row in 1..=spec.rows {
            for col in 1..=spec.cols {
                for depth in 1..=spec.depth {
                    let id = LocationId::new(format!("{}-{row:02}-{col:02}-{depth}", spec.zone))?;
                    let roll = rng.next_u64() % 10;
                    let (product_type, quantity) = match roll {
                        // Never assigned: no product, no stock.
                        0 | 1 => (None, 0),
                        // Stocked out: assigned, zero on hand.
                        2 => (Some(product.clone()), 0),
                        _ => (Some(product.clone()), (rng.next_u64() % 20) as i64 + 1),
                    };
                    locations.push(Location {
                        id,
                        zone: zone.clone(),
                        storage_type: storage.clone(),
                        product_type,
                        quantity,
                        capacity: Some(DEMO_CAPACITY),
                        position: Position::new(
                            spec.origin.0 + f64::from(col) * 1.5,
                            spec.origin.1 + f64::from(row) * 2.0,
                            f64::from(depth) * 1.5,
                        ),
                    });
                }
            }
        }
    }

    for slot in 1..=DOCK_SLOTS {
        locations.push(Location {
            id: LocationId::new(format!("DOCK-{slot}"))?,
            zone: Zone::new("DOCK")?,
            storage_type: StorageType::new("Receiving Dock")?,
            product_type: None,
            quantity: 0,
            capacity: None,
            position: Position::new(2.0, 30.0 + f64::from(slot) * 5.0, 0.0),
        });
    }

    Ok(locations)
}

/// Registry closed over the demo vocabulary, so ingestion cross-checks the
/// generator against its own floor plan.
pub fn demo_registry() -> DomainResult<TagRegistry> {
    let specs = demo_zone_specs();
    let mut zones = Vec::new();
    let mut products = Vec::new();
    let mut storages = Vec::new();
    for spec in &specs {
        zones.push(Zone::new(spec.zone)?);
        products.push(ProductType::new(spec.product)?);
        storages.push(StorageType::new(spec.storage)?);
    }
    zones.push(Zone::new("DOCK")?);
    storages.push(StorageType::new("Receiving Dock")?);

    Ok(TagRegistry::open()
        .with_zones(zones)
        .with_product_types(products)
        .with_storage_types(storages))
}

/// Generate and ingest a full demo catalog.
pub fn demo_catalog(seed: u64) -> DomainResult<Catalog> {
    Catalog::ingest(demo_locations(seed)?, &demo_registry()?)
}

// splitmix64; enough spread for layout seeding without pulling in an RNG crate.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
