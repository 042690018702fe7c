// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QDF record kinds and their keywords

/// Tag shared by panel-like records (same field layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanelKind {
    Panel,
    Display,
    Textile,
}

/// Tag shared by clamp-like records (same field layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClampKind {
    Clamp,
    Slide,
    SlideEnd,
    MultiWheel,
}

/// Every geometry kind the model partitions records into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryKind {
    Connector3,
    Connector45,
    Tube,
    Panel,
    Display,
    Textile,
    Clamp,
    Slide,
    SlideEnd,
    MultiWheel,
}

impl GeometryKind {
    pub const COUNT: usize = 10;

    pub const ALL: [GeometryKind; Self::COUNT] = [
        GeometryKind::Connector3,
        GeometryKind::Connector45,
        GeometryKind::Tube,
        GeometryKind::Panel,
        GeometryKind::Display,
        GeometryKind::Textile,
        GeometryKind::Clamp,
        GeometryKind::Slide,
        GeometryKind::SlideEnd,
        GeometryKind::MultiWheel,
    ];

    /// Position in [`GeometryKind::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical keyword (aliases map to their primary spelling)
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Connector3 => "connector3",
            GeometryKind::Connector45 => "connector45_2",
            GeometryKind::Tube => "tube2",
            GeometryKind::Panel => "panel2",
            GeometryKind::Display => "display2",
            GeometryKind::Textile => "textil2",
            GeometryKind::Clamp => "clamp2",
            GeometryKind::Slide => "slide2",
            GeometryKind::SlideEnd => "slide-end2",
            GeometryKind::MultiWheel => "multi-wheel2",
        }
    }
}

impl From<PanelKind> for GeometryKind {
    fn from(kind: PanelKind) -> Self {
        match kind {
            PanelKind::Panel => GeometryKind::Panel,
            PanelKind::Display => GeometryKind::Display,
            PanelKind::Textile => GeometryKind::Textile,
        }
    }
}

impl From<ClampKind> for GeometryKind {
    fn from(kind: ClampKind) -> Self {
        match kind {
            ClampKind::Clamp => GeometryKind::Clamp,
            ClampKind::Slide => GeometryKind::Slide,
            ClampKind::SlideEnd => GeometryKind::SlideEnd,
            ClampKind::MultiWheel => GeometryKind::MultiWheel,
        }
    }
}

/// Record kind selected by a line's leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Material,
    Connector3,
    Connector45,
    Tube,
    PanelLike(PanelKind),
    ClampLike(ClampKind),
}

impl RecordKind {
    /// Look up a keyword; `None` for keywords this decoder ignores
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "material3" => RecordKind::Material,
            "connector3" => RecordKind::Connector3,
            "connector45_2" => RecordKind::Connector45,
            "tube2" => RecordKind::Tube,
            "panel2" => RecordKind::PanelLike(PanelKind::Panel),
            "display2" => RecordKind::PanelLike(PanelKind::Display),
            "textil2" => RecordKind::PanelLike(PanelKind::Textile),
            "clamp2" => RecordKind::ClampLike(ClampKind::Clamp),
            "slide2" | "slide-new2" => RecordKind::ClampLike(ClampKind::Slide),
            "slide-end2" => RecordKind::ClampLike(ClampKind::SlideEnd),
            "multi-wheel2" => RecordKind::ClampLike(ClampKind::MultiWheel),
            _ => return None,
        };
        Some(kind)
    }

    pub fn geometry_kind(self) -> Option<GeometryKind> {
        match self {
            RecordKind::Material => None,
            RecordKind::Connector3 => Some(GeometryKind::Connector3),
            RecordKind::Connector45 => Some(GeometryKind::Connector45),
            RecordKind::Tube => Some(GeometryKind::Tube),
            RecordKind::PanelLike(kind) => Some(kind.into()),
            RecordKind::ClampLike(kind) => Some(kind.into()),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self.geometry_kind() {
            Some(kind) => kind.keyword(),
            None => "material3",
        }
    }
}
