//! # Placement Offsets
//!
//! Some prefabs are authored with their pivot away from their base. After
//! such an instance is spawned at a computed grid position, its position is
//! corrected by a per-prefab offset. Prefabs without an offset are left
//! where they were spawned.

use std::collections::HashMap;

use strider_shared::Vec3;

use crate::pool::{InstanceHandle, ObjectPoolProvider};

/// Applies a secondary positional offset to freshly spawned instances.
pub trait PlacementService {
    /// Repositions `instance` (spawned from pool `name`) relative to
    /// `computed`. A no-op for prefabs that declare no offset.
    fn apply_offset<P: ObjectPoolProvider + ?Sized>(
        &self,
        pool: &mut P,
        name: &str,
        instance: InstanceHandle,
        computed: Vec3,
    );
}

/// Per-prefab pivot offsets.
#[derive(Clone, Debug, Default)]
pub struct PivotOffsets {
    offsets: HashMap<String, Vec3>,
}

impl PivotOffsets {
    /// Creates an empty offset table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an offset for a prefab (builder style).
    #[must_use]
    pub fn with_offset(mut self, name: &str, offset: Vec3) -> Self {
        self.insert(name, offset);
        self
    }

    /// Declares or replaces an offset for a prefab.
    pub fn insert(&mut self, name: &str, offset: Vec3) {
        self.offsets.insert(name.to_owned(), offset);
    }

    /// Offset declared for a prefab.
    #[must_use]
    pub fn offset_for(&self, name: &str) -> Option<Vec3> {
        self.offsets.get(name).copied()
    }
}

impl FromIterator<(String, Vec3)> for PivotOffsets {
    fn from_iter<I: IntoIterator<Item = (String, Vec3)>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

impl PlacementService for PivotOffsets {
    fn apply_offset<P: ObjectPoolProvider + ?Sized>(
        &self,
        pool: &mut P,
        name: &str,
        instance: InstanceHandle,
        computed: Vec3,
    ) {
        if let Some(offset) = self.offset_for(name) {
            pool.set_position(instance, computed + offset);
        }
    }
}
