// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable model summaries

use std::collections::BTreeMap;

use qdf_lite_core::{GeometryKind, QdfModel};
use serde::Serialize;

use crate::error::Result;
use crate::materials::MaterialTable;

/// Axis-aligned bounds of record positions, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    fn from_point(p: [f64; 3]) -> Self {
        Self { min: p, max: p }
    }

    fn expand(&mut self, p: [f64; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Overview of a decoded model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub geometry_count: usize,
    pub material_count: usize,
    /// Records per canonical keyword; kinds with no records are omitted
    pub per_kind: BTreeMap<&'static str, usize>,
    /// `connector3` records per topology
    pub connector_topologies: BTreeMap<&'static str, usize>,
    pub dangling_material_refs: usize,
    pub bounds: Option<Bounds>,
}

impl ModelSummary {
    pub fn from_model(model: &QdfModel) -> Self {
        let per_kind = GeometryKind::ALL
            .iter()
            .map(|&kind| (kind.keyword(), model.count(kind)))
            .filter(|&(_, count)| count > 0)
            .collect();

        let mut connector_topologies = BTreeMap::new();
        for connector in model.connectors3() {
            *connector_topologies
                .entry(connector.topology().as_str())
                .or_insert(0) += 1;
        }

        let bounds = model
            .geometries()
            .iter()
            .map(|g| {
                let p = g.transform().position;
                [p.x, p.y, p.z]
            })
            .fold(None, |acc: Option<Bounds>, p| match acc {
                None => Some(Bounds::from_point(p)),
                Some(mut b) => {
                    b.expand(p);
                    Some(b)
                }
            });

        let table = MaterialTable::from_model(model);

        Self {
            geometry_count: model.geometries().len(),
            material_count: model.materials().len(),
            per_kind,
            connector_topologies,
            dangling_material_refs: table.dangling(model.geometries()).len(),
            bounds,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
