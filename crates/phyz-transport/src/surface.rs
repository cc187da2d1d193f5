//! Registration of surfaces on logical volumes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named surface attached to the skin of a logical volume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceTag {
    pub name: String,
}

impl SurfaceTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Lookup of periodic surfaces by logical volume name.
pub trait SurfaceRegistry {
    fn periodic_surface(&self, logical_volume: &str) -> Option<&SurfaceTag>;
}

/// Skin surfaces keyed by logical volume. At most one surface per volume;
/// registering again replaces the previous one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SkinSurfaceTable {
    surfaces: HashMap<String, SurfaceTag>,
}

impl SkinSurfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the skin of `logical_volume` as periodic.
    pub fn register(&mut self, logical_volume: impl Into<String>, tag: SurfaceTag) {
        self.surfaces.insert(logical_volume.into(), tag);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_surface(mut self, logical_volume: impl Into<String>, tag: SurfaceTag) -> Self {
        self.register(logical_volume, tag);
        self
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SurfaceRegistry for SkinSurfaceTable {
    fn periodic_surface(&self, logical_volume: &str) -> Option<&SurfaceTag> {
        self.surfaces.get(logical_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut table = SkinSurfaceTable::new().with_surface("CellLV", SurfaceTag::new("periodic"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.periodic_surface("CellLV").unwrap().name, "periodic");
        assert!(table.periodic_surface("WorldLV").is_none());

        table.register("CellLV", SurfaceTag::new("replaced"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.periodic_surface("CellLV").unwrap().name, "replaced");
        assert!(!table.is_empty());
    }
}
