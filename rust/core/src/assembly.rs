// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembly builder
//!
//! Drives the line-by-line decode and partitions accepted records into the
//! flat geometry list, the per-kind lists and the material list. Rejected
//! lines are dropped silently; parsing a text never fails.

use crate::decoder::{decode_record, Record};
use crate::model::{Geometry, Material, QdfModel};
use crate::parser::RecordScanner;
use crate::schema::GeometryKind;

/// Accumulates records in arrival order and freezes them into a [`QdfModel`]
#[derive(Debug, Default)]
pub struct AssemblyBuilder {
    geometries: Vec<Geometry>,
    by_kind: [Vec<usize>; GeometryKind::COUNT],
    materials: Vec<Material>,
}

impl AssemblyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        match record {
            Record::Material(material) => self.push_material(material),
            Record::Geometry(geometry) => self.push_geometry(geometry),
        }
    }

    pub fn push_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn push_geometry(&mut self, geometry: Geometry) {
        self.by_kind[geometry.kind().index()].push(self.geometries.len());
        self.geometries.push(geometry);
    }

    /// Records accepted so far
    pub fn len(&self) -> usize {
        self.geometries.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze into an immutable model that remembers its source text
    pub fn finish(self, raw: impl Into<String>) -> QdfModel {
        QdfModel::from_parts(raw.into(), self.geometries, self.by_kind, self.materials)
    }
}

/// Decode a whole QDF text in one sequential pass
///
/// Unknown keywords and invalid records are skipped; the result may be
/// empty but is always produced.
pub fn parse_qdf(content: &str) -> QdfModel {
    let mut builder = AssemblyBuilder::new();
    for record in RecordScanner::new(content) {
        if let Ok(decoded) = decode_record(record.keyword, record.body) {
            builder.push(decoded);
        }
    }
    builder.finish(content)
}
