//! Validated categorical tags: zone, product type, storage type.
//!
//! Tags arrive from the layout generator as loose strings. Each category is
//! a validated newtype so a typo cannot silently create a phantom group in
//! the analytics tables; the allowed vocabulary per category is supplied as
//! configuration via [`TagRegistry`], not hardcoded in engine logic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! impl_tag_newtype {
    ($t:ident, $name:literal) => {
        /// Categorical tag, non-blank by construction.
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be blank")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl core::str::FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_tag_newtype!(Zone, "zone");
impl_tag_newtype!(ProductType, "product type");
impl_tag_newtype!(StorageType, "storage type");

/// Allowed tag vocabulary per category, supplied as configuration.
///
/// An empty set leaves that category open (any non-blank tag passes). A
/// non-empty set closes the category: ingestion rejects tags outside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRegistry {
    pub zones: BTreeSet<Zone>,
    pub product_types: BTreeSet<ProductType>,
    pub storage_types: BTreeSet<StorageType>,
}

impl TagRegistry {
    /// Registry with every category open.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn with_zones<I: IntoIterator<Item = Zone>>(mut self, zones: I) -> Self {
        self.zones = zones.into_iter().collect();
        self
    }

    pub fn with_product_types<I: IntoIterator<Item = ProductType>>(mut self, types: I) -> Self {
        self.product_types = types.into_iter().collect();
        self
    }

    pub fn with_storage_types<I: IntoIterator<Item = StorageType>>(mut self, types: I) -> Self {
        self.storage_types = types.into_iter().collect();
        self
    }

    pub fn check_zone(&self, zone: &Zone) -> Result<(), DomainError> {
        if self.zones.is_empty() || self.zones.contains(zone) {
            Ok(())
        } else {
            Err(DomainError::schema(format!("zone not in registry: {zone}")))
        }
    }

    pub fn check_product_type(&self, product_type: &ProductType) -> Result<(), DomainError> {
        if self.product_types.is_empty() || self.product_types.contains(product_type) {
            Ok(())
        } else {
            Err(DomainError::schema(format!(
                "product type not in registry: {product_type}"
            )))
        }
    }

    pub fn check_storage_type(&self, storage_type: &StorageType) -> Result<(), DomainError> {
        if self.storage_types.is_empty() || self.storage_types.contains(storage_type) {
            Ok(())
        } else {
            Err(DomainError::schema(format!(
                "storage type not in registry: {storage_type}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_trim_and_reject_blank() {
        let zone = Zone::new("  A  ").unwrap();
        assert_eq!(zone.as_str(), "A");

        let err = ProductType::new("").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn open_registry_accepts_any_tag() {
        let registry = TagRegistry::open();
        registry.check_zone(&Zone::new("Z9").unwrap()).unwrap();
        registry
            .check_storage_type(&StorageType::new("Packing Station").unwrap())
            .unwrap();
    }

    #[test]
    fn closed_registry_rejects_unknown_zone() {
        let registry = TagRegistry::open().with_zones([Zone::new("A").unwrap()]);
        registry.check_zone(&Zone::new("A").unwrap()).unwrap();

        let err = registry.check_zone(&Zone::new("B").unwrap()).unwrap_err();
        assert!(matches!(err, DomainError::SchemaViolation(_)));
    }

    #[test]
    fn closed_registry_rejects_unknown_product_type() {
        let registry =
            TagRegistry::open().with_product_types([ProductType::new("Jeans").unwrap()]);
        let err = registry
            .check_product_type(&ProductType::new("Jaens").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::SchemaViolation(_)));
    }
}
