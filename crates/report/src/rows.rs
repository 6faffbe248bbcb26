use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmap_analytics::{BalanceStat, GroupMetrics, UNASSIGNED_LABEL};
use stockmap_catalog::{Catalog, Location};
use stockmap_stocktake::StocktakeSession;

/// One location, flattened: one column per named attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub location_id: String,
    pub zone: String,
    pub storage_type: String,
    pub product_type: String,
    pub quantity: i64,
    pub capacity: Option<i64>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Location> for LocationRow {
    fn from(location: &Location) -> Self {
        Self {
            location_id: location.id.to_string(),
            zone: location.zone.to_string(),
            storage_type: location.storage_type.to_string(),
            product_type: location
                .product_type
                .as_ref()
                .map_or_else(|| UNASSIGNED_LABEL.to_string(), ToString::to_string),
            quantity: location.quantity,
            capacity: location.capacity,
            x: location.position.x,
            y: location.position.y,
            z: location.position.z,
        }
    }
}

/// One verification record, flattened, with the derived discrepancy and a
/// staleness marker from the audit against the given catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRow {
    pub location_id: String,
    pub system_quantity: i64,
    pub actual_quantity: i64,
    pub discrepancy: i64,
    pub note: Option<String>,
    pub verified_by: String,
    pub verified_at: DateTime<Utc>,
    pub stale: bool,
}

/// One group of a `group_by` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub group: String,
    pub count: usize,
    pub total_quantity: i64,
    pub avg_quantity: f64,
}

/// One group of a balance-statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: Option<f64>,
}

/// Flatten a selection, in selection order.
pub fn location_rows<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Vec<LocationRow> {
    locations.into_iter().map(LocationRow::from).collect()
}

/// Flatten the session ledger in location-id order. Records stranded by a
/// catalog regeneration come through with `stale = true` rather than being
/// dropped.
pub fn verification_rows(session: &StocktakeSession, catalog: &Catalog) -> Vec<VerificationRow> {
    session
        .records()
        .map(|record| VerificationRow {
            location_id: record.location_id.to_string(),
            system_quantity: record.system_quantity,
            actual_quantity: record.actual_quantity,
            discrepancy: record.discrepancy(),
            note: record.note.clone(),
            verified_by: record.verified_by.to_string(),
            verified_at: record.verified_at,
            stale: !catalog.contains(&record.location_id),
        })
        .collect()
}

/// Flatten a grouping table, keys already in lexicographic order.
pub fn group_rows(groups: &BTreeMap<String, GroupMetrics>) -> Vec<GroupRow> {
    groups
        .iter()
        .map(|(group, metrics)| GroupRow {
            group: group.clone(),
            count: metrics.count,
            total_quantity: metrics.total_quantity,
            avg_quantity: metrics.avg_quantity,
        })
        .collect()
}

/// Flatten a balance-statistics table.
pub fn balance_rows(stats: &BTreeMap<String, BalanceStat>) -> Vec<BalanceRow> {
    stats
        .iter()
        .map(|(group, stat)| BalanceRow {
            group: group.clone(),
            count: stat.count,
            mean: stat.mean,
            std_dev: stat.std_dev,
            coefficient_of_variation: stat.coefficient_of_variation,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockmap_analytics::{group_by, Dimension};
    use stockmap_catalog::Position;
    use stockmap_core::{LocationId, ProductType, StorageType, TagRegistry, Zone};
    use stockmap_stocktake::{OperatorName, VerifyLocation};

    fn location(id: &str, product: Option<&str>, quantity: i64) -> Location {
        Location {
            id: LocationId::new(id).unwrap(),
            zone: Zone::new("A").unwrap(),
            storage_type: StorageType::new("Folded Shelves").unwrap(),
            product_type: product.map(|p| ProductType::new(p).unwrap()),
            quantity,
            capacity: Some(24),
            position: Position::new(11.5, 72.0, 1.5),
        }
    }

    #[test]
    fn location_row_has_one_column_per_attribute() {
        let loc = location("A-01-01-1", Some("T-shirts"), 7);
        let rows = location_rows([&loc]);
        let json = serde_json::to_value(&rows[0]).unwrap();

        assert_eq!(json["location_id"], "A-01-01-1");
        assert_eq!(json["zone"], "A");
        assert_eq!(json["storage_type"], "Folded Shelves");
        assert_eq!(json["product_type"], "T-shirts");
        assert_eq!(json["quantity"], 7);
        assert_eq!(json["capacity"], 24);
        assert_eq!(json["x"], 11.5);
    }

    #[test]
    fn unassigned_location_exports_the_sentinel_label() {
        let loc = location("A-01-01-1", None, 0);
        let rows = location_rows([&loc]);
        assert_eq!(rows[0].product_type, UNASSIGNED_LABEL);
    }

    #[test]
    fn verification_rows_carry_discrepancy_and_staleness() {
        let catalog = Catalog::ingest(
            vec![location("A-01", Some("T-shirts"), 5), location("A-02", Some("T-shirts"), 9)],
            &TagRegistry::open(),
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut session = StocktakeSession::begin(OperatorName::new("dana").unwrap(), at);
        for (id, actual) in [("A-01", 8), ("A-02", 9)] {
            session
                .verify(
                    &catalog,
                    VerifyLocation {
                        location_id: LocationId::new(id).unwrap(),
                        actual_quantity: actual,
                        note: None,
                        verified_by: OperatorName::new("dana").unwrap(),
                        occurred_at: at,
                    },
                )
                .unwrap();
        }

        // Regeneration drops A-02; its row survives, marked stale.
        let regenerated = Catalog::ingest(
            vec![location("A-01", Some("T-shirts"), 5)],
            &TagRegistry::open(),
        )
        .unwrap();
        let rows = verification_rows(&session, &regenerated);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location_id, "A-01");
        assert_eq!(rows[0].discrepancy, 3);
        assert!(!rows[0].stale);
        assert_eq!(rows[1].location_id, "A-02");
        assert_eq!(rows[1].discrepancy, 0);
        assert!(rows[1].stale);
    }

    #[test]
    fn group_rows_preserve_key_order() {
        let locations = vec![
            location("A-01", Some("T-shirts"), 4),
            location("A-02", Some("Jeans"), 6),
        ];
        let groups = group_by(locations.iter(), Dimension::ProductType);
        let rows = group_rows(&groups);

        let names: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(names, vec!["Jeans", "T-shirts"]);
        assert_eq!(rows[0].total_quantity, 6);
    }
}
