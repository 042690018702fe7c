// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed QDF model
//!
//! Typed records plus the immutable [`QdfModel`] that owns them. Geometry is
//! a closed enum: every variant carries its id, raw orientation and derived
//! transform, followed by kind-specific scalars.

use crate::orientation::{OrientationRaw, Transform};
use crate::schema::{ClampKind, GeometryKind, PanelKind};
use crate::topology::{classify_connector, ConnectorTopology};

/// Material shading hints. QDF does not carry these, every material gets
/// the same defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadingHints {
    pub metalness: f64,
    pub roughness: f64,
    pub opacity: f64,
    pub transparent: bool,
}

impl Default for ShadingHints {
    fn default() -> Self {
        Self {
            metalness: 0.1,
            roughness: 0.5,
            opacity: 1.0,
            transparent: false,
        }
    }
}

/// `material3` record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub material_type: i64,
    /// Channels clamped to [0, 1]
    pub linear_color: [f64; 3],
    /// Same channels; only clamping is applied, no transfer curve
    pub srgb_color: [f64; 3],
    /// `0xRRGGBB`
    pub color_hex: u32,
    pub shading: ShadingHints,
    pub flags: i64,
}

impl Material {
    /// Color as a `#rrggbb` string
    pub fn css_color(&self) -> String {
        format!("#{:06x}", self.color_hex)
    }
}

/// Clamp each channel to [0, 1]
#[inline]
pub fn clamp_color(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| c.clamp(0.0, 1.0))
}

/// Pack a color into `(R << 16) | (G << 8) | B`, clamping first
pub fn pack_color_hex(rgb: [f64; 3]) -> u32 {
    let [r, g, b] = clamp_color(rgb).map(|c| (c * 255.0).round() as u32);
    (r << 16) | (g << 8) | b
}

/// `connector3` record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector3 {
    pub id: i64,
    pub orientation_raw: OrientationRaw,
    pub transform: Transform,
    pub color_id: i64,
    pub rotation_index: i64,
    /// Direction bitmask, see [`crate::topology`]
    pub connector_type: u32,
    pub grid_j: i64,
    pub flags: i64,
    pub reserved: i64,
}

impl Connector3 {
    #[inline]
    pub fn topology(&self) -> ConnectorTopology {
        classify_connector(self.connector_type)
    }
}

/// `connector45_2` record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector45 {
    pub id: i64,
    pub orientation_raw: OrientationRaw,
    pub transform: Transform,
    pub connector_type: i64,
    pub flag1: i64,
    pub flag2: i64,
}

/// `tube2` record. `transform.position` is the tube's center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tube {
    pub id: i64,
    pub orientation_raw: OrientationRaw,
    pub transform: Transform,
    pub material_id: i64,
    /// Length in millimetres
    pub length: f64,
    pub dim2: f64,
    pub dim3: f64,
}

/// `panel2`, `display2`, `textil2`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelLike {
    pub kind: PanelKind,
    pub id: i64,
    pub orientation_raw: OrientationRaw,
    pub transform: Transform,
    pub material_id: i64,
    pub dim1: f64,
    pub dim2: f64,
    pub dim3: f64,
    pub offset1: f64,
    pub offset2: f64,
}

/// `clamp2`, `slide2`/`slide-new2`, `slide-end2`, `multi-wheel2`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampLike {
    pub kind: ClampKind,
    pub id: i64,
    pub orientation_raw: OrientationRaw,
    pub transform: Transform,
    pub material_id: i64,
    pub flag: i64,
}

/// Any accepted geometry record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Geometry {
    Connector3(Connector3),
    Connector45(Connector45),
    Tube(Tube),
    PanelLike(PanelLike),
    ClampLike(ClampLike),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Connector3(_) => GeometryKind::Connector3,
            Geometry::Connector45(_) => GeometryKind::Connector45,
            Geometry::Tube(_) => GeometryKind::Tube,
            Geometry::PanelLike(p) => p.kind.into(),
            Geometry::ClampLike(c) => c.kind.into(),
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Geometry::Connector3(g) => g.id,
            Geometry::Connector45(g) => g.id,
            Geometry::Tube(g) => g.id,
            Geometry::PanelLike(g) => g.id,
            Geometry::ClampLike(g) => g.id,
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            Geometry::Connector3(g) => &g.transform,
            Geometry::Connector45(g) => &g.transform,
            Geometry::Tube(g) => &g.transform,
            Geometry::PanelLike(g) => &g.transform,
            Geometry::ClampLike(g) => &g.transform,
        }
    }

    pub fn orientation_raw(&self) -> &OrientationRaw {
        match self {
            Geometry::Connector3(g) => &g.orientation_raw,
            Geometry::Connector45(g) => &g.orientation_raw,
            Geometry::Tube(g) => &g.orientation_raw,
            Geometry::PanelLike(g) => &g.orientation_raw,
            Geometry::ClampLike(g) => &g.orientation_raw,
        }
    }

    /// Material id this record points at. Not validated against the
    /// model's materials.
    pub fn material_ref(&self) -> Option<i64> {
        match self {
            Geometry::Connector3(g) => Some(g.color_id),
            Geometry::Connector45(_) => None,
            Geometry::Tube(g) => Some(g.material_id),
            Geometry::PanelLike(g) => Some(g.material_id),
            Geometry::ClampLike(g) => Some(g.material_id),
        }
    }
}

/// Immutable result of decoding one QDF text
///
/// Geometry is kept once, in source order; per-kind views are index lists
/// into that flat list, so they share its order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QdfModel {
    raw: String,
    geometries: Vec<Geometry>,
    by_kind: [Vec<usize>; GeometryKind::COUNT],
    materials: Vec<Material>,
}

impl QdfModel {
    pub(crate) fn from_parts(
        raw: String,
        geometries: Vec<Geometry>,
        by_kind: [Vec<usize>; GeometryKind::COUNT],
        materials: Vec<Material>,
    ) -> Self {
        Self {
            raw,
            geometries,
            by_kind,
            materials,
        }
    }

    /// The text this model was decoded from
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Every accepted geometry record in source order
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Records of one kind in source order
    pub fn of_kind(&self, kind: GeometryKind) -> impl Iterator<Item = &Geometry> + '_ {
        self.by_kind[kind.index()]
            .iter()
            .map(move |&i| &self.geometries[i])
    }

    pub fn count(&self, kind: GeometryKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty() && self.materials.is_empty()
    }

    pub fn connectors3(&self) -> impl Iterator<Item = &Connector3> + '_ {
        self.of_kind(GeometryKind::Connector3).filter_map(|g| match g {
            Geometry::Connector3(c) => Some(c),
            _ => None,
        })
    }

    pub fn connectors45(&self) -> impl Iterator<Item = &Connector45> + '_ {
        self.of_kind(GeometryKind::Connector45).filter_map(|g| match g {
            Geometry::Connector45(c) => Some(c),
            _ => None,
        })
    }

    pub fn tubes(&self) -> impl Iterator<Item = &Tube> + '_ {
        self.of_kind(GeometryKind::Tube).filter_map(|g| match g {
            Geometry::Tube(t) => Some(t),
            _ => None,
        })
    }

    pub fn panel_like(&self, kind: PanelKind) -> impl Iterator<Item = &PanelLike> + '_ {
        self.of_kind(kind.into()).filter_map(|g| match g {
            Geometry::PanelLike(p) => Some(p),
            _ => None,
        })
    }

    pub fn clamp_like(&self, kind: ClampKind) -> impl Iterator<Item = &ClampLike> + '_ {
        self.of_kind(kind.into()).filter_map(|g| match g {
            Geometry::ClampLike(c) => Some(c),
            _ => None,
        })
    }
}
