// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material lookup for renderers
//!
//! The core model keeps materials as a plain list. Consumers that need to
//! resolve a geometry's material id build this table once per model.

use qdf_lite_core::{Geometry, Material, QdfModel};
use rustc_hash::FxHashMap;

/// Material id → material, borrowed from a model
#[derive(Debug, Clone)]
pub struct MaterialTable<'a> {
    materials: &'a [Material],
    index: FxHashMap<i64, usize>,
}

impl<'a> MaterialTable<'a> {
    /// Index a material list. A later definition of the same id replaces
    /// an earlier one.
    pub fn new(materials: &'a [Material]) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(materials.len());
        for (i, material) in materials.iter().enumerate() {
            index.insert(material.id, i);
        }
        Self { materials, index }
    }

    pub fn from_model(model: &'a QdfModel) -> Self {
        Self::new(model.materials())
    }

    #[inline]
    pub fn get(&self, id: i64) -> Option<&'a Material> {
        self.index.get(&id).map(|&i| &self.materials[i])
    }

    /// Material a geometry refers to, `None` when it has no reference or
    /// the reference dangles
    pub fn resolve(&self, geometry: &Geometry) -> Option<&'a Material> {
        geometry.material_ref().and_then(|id| self.get(id))
    }

    /// Ids of geometries whose material reference does not resolve
    pub fn dangling(&self, geometries: &[Geometry]) -> Vec<i64> {
        geometries
            .iter()
            .filter(|g| matches!(g.material_ref(), Some(id) if !self.index.contains_key(&id)))
            .map(Geometry::id)
            .collect()
    }

    /// Distinct material ids
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
