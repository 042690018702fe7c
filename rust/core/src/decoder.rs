// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-kind record decoders
//!
//! Geometry records share one shape:
//!
//! ```text
//! <keyword>,<id>,{a,b,c,d,x,y,z},<param>,<param>,...;
//! ```
//!
//! Each kind has a fixed parameter count. A record with fewer parameters is
//! malformed; a record with more carries a visibility range, which is not
//! supported, and is rejected as a whole.

use crate::error::{Error, Result};
use crate::fast_parse::{parse_f64, parse_i64, parse_u32};
use crate::model::{
    clamp_color, pack_color_hex, ClampLike, Connector3, Connector45, Geometry, Material,
    PanelLike, ShadingHints, Tube,
};
use crate::orientation::{tube_center_transform, OrientationRaw};
use crate::parser::{classify_line, split_brace_block, split_quoted_csv, strip_quotes, Fields, Line};
use crate::schema::{ClampKind, PanelKind, RecordKind};

/// Minimum quoted-CSV fields of a `material3` record (id included)
pub const MATERIAL_MIN_FIELDS: usize = 16;
/// Trailing parameters of a `connector3` record
pub const CONNECTOR3_PARAMS: usize = 6;
/// Trailing parameters of a `connector45_2` record
pub const CONNECTOR45_PARAMS: usize = 3;
/// Trailing parameters of a `tube2` record
pub const TUBE_PARAMS: usize = 4;
/// Trailing parameters of panel-like records
pub const PANEL_PARAMS: usize = 6;
/// Trailing parameters of clamp-like records
pub const CLAMP_PARAMS: usize = 2;

/// A successfully decoded line
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Material(Material),
    Geometry(Geometry),
}

/// Id, orientation and trailing parameters of a geometry record
struct RecordFields<'a> {
    id: i64,
    orientation: OrientationRaw,
    params: Fields<'a>,
}

/// Split a geometry record body and check its parameter count
fn split_record<'a>(kind: &'static str, body: &'a str, params: usize) -> Result<RecordFields<'a>> {
    let split = split_brace_block(body)?;
    let orientation = OrientationRaw::parse(split.block)?;

    let id_token = split.before.trim().trim_end_matches(',').trim();
    let id = parse_i64("id", id_token)?;

    let after = split.after.trim();
    let after = after.strip_prefix(',').unwrap_or(after);
    let fields = split_quoted_csv(after);

    if fields.len() < params {
        return Err(Error::TooFewFields {
            kind,
            expected: params,
            found: fields.len(),
        });
    }
    if fields.len() > params {
        return Err(Error::VisibilityRange { kind });
    }

    Ok(RecordFields {
        id,
        orientation,
        params: fields,
    })
}

/// Decode a `material3` body
pub fn decode_material(body: &str) -> Result<Material> {
    let fields = split_quoted_csv(body);
    if fields.len() < MATERIAL_MIN_FIELDS {
        return Err(Error::TooFewFields {
            kind: "material3",
            expected: MATERIAL_MIN_FIELDS,
            found: fields.len(),
        });
    }

    let rgb = [
        parse_f64("red", fields[3])?,
        parse_f64("green", fields[4])?,
        parse_f64("blue", fields[5])?,
    ];
    let color = clamp_color(rgb);

    Ok(Material {
        id: parse_i64("id", fields[0])?,
        name: strip_quotes(fields[1]).to_string(),
        material_type: parse_i64("materialType", fields[2])?,
        linear_color: color,
        srgb_color: color,
        color_hex: pack_color_hex(rgb),
        shading: ShadingHints::default(),
        flags: parse_i64("flags", fields[fields.len() - 1])?,
    })
}

/// Decode a `connector3` body
pub fn decode_connector3(body: &str) -> Result<Connector3> {
    let RecordFields {
        id,
        orientation,
        params,
    } = split_record("connector3", body, CONNECTOR3_PARAMS)?;

    Ok(Connector3 {
        id,
        orientation_raw: orientation,
        transform: orientation.to_transform(),
        color_id: parse_i64("colorId", params[0])?,
        rotation_index: parse_i64("rotationIndex", params[1])?,
        connector_type: parse_u32("connectorType", params[2])?,
        grid_j: parse_i64("gridJ", params[3])?,
        flags: parse_i64("flags", params[4])?,
        reserved: parse_i64("reserved", params[5])?,
    })
}

/// Decode a `connector45_2` body
pub fn decode_connector45(body: &str) -> Result<Connector45> {
    let RecordFields {
        id,
        orientation,
        params,
    } = split_record("connector45_2", body, CONNECTOR45_PARAMS)?;

    Ok(Connector45 {
        id,
        orientation_raw: orientation,
        transform: orientation.to_transform(),
        connector_type: parse_i64("connectorType", params[0])?,
        flag1: parse_i64("flag1", params[1])?,
        flag2: parse_i64("flag2", params[2])?,
    })
}

/// Decode a `tube2` body; the transform is moved to the tube's center
pub fn decode_tube(body: &str) -> Result<Tube> {
    let RecordFields {
        id,
        orientation,
        params,
    } = split_record("tube2", body, TUBE_PARAMS)?;

    let length = parse_f64("length", params[1])?;
    Ok(Tube {
        id,
        orientation_raw: orientation,
        transform: tube_center_transform(&orientation, length),
        material_id: parse_i64("materialId", params[0])?,
        length,
        dim2: parse_f64("dim2", params[2])?,
        dim3: parse_f64("dim3", params[3])?,
    })
}

/// Decode a `panel2` / `display2` / `textil2` body
pub fn decode_panel_like(kind: PanelKind, body: &str) -> Result<PanelLike> {
    let keyword = RecordKind::PanelLike(kind).keyword();
    let RecordFields {
        id,
        orientation,
        params,
    } = split_record(keyword, body, PANEL_PARAMS)?;

    Ok(PanelLike {
        kind,
        id,
        orientation_raw: orientation,
        transform: orientation.to_transform(),
        material_id: parse_i64("materialId", params[0])?,
        dim1: parse_f64("dim1", params[1])?,
        dim2: parse_f64("dim2", params[2])?,
        dim3: parse_f64("dim3", params[3])?,
        offset1: parse_f64("offset1", params[4])?,
        offset2: parse_f64("offset2", params[5])?,
    })
}

/// Decode a `clamp2` / `slide2` / `slide-end2` / `multi-wheel2` body
pub fn decode_clamp_like(kind: ClampKind, body: &str) -> Result<ClampLike> {
    let keyword = RecordKind::ClampLike(kind).keyword();
    let RecordFields {
        id,
        orientation,
        params,
    } = split_record(keyword, body, CLAMP_PARAMS)?;

    Ok(ClampLike {
        kind,
        id,
        orientation_raw: orientation,
        transform: orientation.to_transform(),
        material_id: parse_i64("materialId", params[0])?,
        flag: parse_i64("flag", params[1])?,
    })
}

/// Decode a record body of a known kind
pub fn decode_kind(kind: RecordKind, body: &str) -> Result<Record> {
    let geometry = match kind {
        RecordKind::Material => return decode_material(body).map(Record::Material),
        RecordKind::Connector3 => Geometry::Connector3(decode_connector3(body)?),
        RecordKind::Connector45 => Geometry::Connector45(decode_connector45(body)?),
        RecordKind::Tube => Geometry::Tube(decode_tube(body)?),
        RecordKind::PanelLike(panel) => Geometry::PanelLike(decode_panel_like(panel, body)?),
        RecordKind::ClampLike(clamp) => Geometry::ClampLike(decode_clamp_like(clamp, body)?),
    };
    Ok(Record::Geometry(geometry))
}

/// Decode a record body by its keyword
pub fn decode_record(keyword: &str, body: &str) -> Result<Record> {
    let kind = RecordKind::from_keyword(keyword)
        .ok_or_else(|| Error::UnknownKeyword(keyword.to_string()))?;
    decode_kind(kind, body)
}

/// Classify and decode a single line
pub fn decode_line(line: &str) -> Result<Record> {
    match classify_line(line) {
        Line::Record { keyword, body } => decode_record(keyword, body),
        Line::Blank | Line::Header | Line::Comment => Err(Error::NotARecord),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ConnectorTopology;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    const MATERIAL: &str =
        r#"material3,12,"Oak, oiled",2,0.8,0.4,0.2,0,0,0,0,0,0,0,0,0,7;"#;

    fn geometry(line: &str) -> Geometry {
        match decode_line(line) {
            Ok(Record::Geometry(g)) => g,
            other => panic!("expected geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_connector3() {
        let g = geometry("connector3,1,{0,0,0,1,100,200,300},5,0,3,0,0,0;");
        let Geometry::Connector3(c) = g else {
            panic!("expected connector3");
        };
        assert_eq!(c.id, 1);
        assert_eq!(c.transform.position, Point3::new(100.0, 200.0, 300.0));
        assert_eq!(c.color_id, 5);
        assert_eq!(c.connector_type, 3);
        assert_eq!(c.topology(), ConnectorTopology::Straight);
    }

    #[test]
    fn test_connector3_visibility_range() {
        assert_eq!(
            decode_line("connector3,1,{0,0,0,1,100,200,300},5,0,3,0,0,0,10;"),
            Err(Error::VisibilityRange { kind: "connector3" })
        );
        assert_eq!(
            decode_line("connector3,1,{0,0,0,1,100,200,300},5,0,3,0,0,0,10,20;"),
            Err(Error::VisibilityRange { kind: "connector3" })
        );
    }

    #[test]
    fn test_connector45() {
        let g = geometry("connector45_2,4,{1,0,0,0,0,0,0},9,1,0");
        let Geometry::Connector45(c) = g else {
            panic!("expected connector45");
        };
        assert_eq!((c.connector_type, c.flag1, c.flag2), (9, 1, 0));
        assert!(matches!(
            decode_line("connector45_2,4,{1,0,0,0,0,0,0},9,1,0,3;"),
            Err(Error::VisibilityRange { .. })
        ));
    }

    #[test]
    fn test_tube_is_centered() {
        let g = geometry("tube2,7,{1,0,0,0,0,0,0},3,500,20,20;");
        let Geometry::Tube(t) = g else {
            panic!("expected tube");
        };
        assert_eq!(t.material_id, 3);
        assert_relative_eq!(t.length, 500.0);
        assert_relative_eq!(t.transform.position, Point3::new(250.0, 0.0, 0.0), epsilon = 1e-9);
        // Raw position is still available
        assert_eq!(t.orientation_raw.position(), Point3::origin());
    }

    #[test]
    fn test_panel_like_tags() {
        for (keyword, kind) in [
            ("panel2", PanelKind::Panel),
            ("display2", PanelKind::Display),
            ("textil2", PanelKind::Textile),
        ] {
            let line = format!("{},3,{{1,0,0,0,1,2,3}},8,400,300,19,0.5,-0.5;", keyword);
            let Geometry::PanelLike(p) = geometry(&line) else {
                panic!("expected panel-like");
            };
            assert_eq!(p.kind, kind);
            assert_eq!(p.material_id, 8);
            assert_relative_eq!(p.offset2, -0.5);
        }
    }

    #[test]
    fn test_clamp_like_tags() {
        for (keyword, kind) in [
            ("clamp2", ClampKind::Clamp),
            ("slide2", ClampKind::Slide),
            ("slide-new2", ClampKind::Slide),
            ("slide-end2", ClampKind::SlideEnd),
            ("multi-wheel2", ClampKind::MultiWheel),
        ] {
            let line = format!("{},11,{{1,0,0,0,0,0,0}},2,1;", keyword);
            let Geometry::ClampLike(c) = geometry(&line) else {
                panic!("expected clamp-like");
            };
            assert_eq!(c.kind, kind);
            assert_eq!((c.id, c.material_id, c.flag), (11, 2, 1));
        }
    }

    #[test]
    fn test_material() {
        let Ok(Record::Material(m)) = decode_line(MATERIAL) else {
            panic!("expected material");
        };
        assert_eq!(m.id, 12);
        assert_eq!(m.name, "Oak, oiled");
        assert_eq!(m.material_type, 2);
        assert_eq!(m.color_hex, 0xCC6633);
        assert_eq!(m.flags, 7);
        assert_eq!(m.shading, ShadingHints::default());
    }

    #[test]
    fn test_material_clamps_channels() {
        let m = decode_material(r#"1,"Hot",0,1.5,-2,0.5,0,0,0,0,0,0,0,0,0,0"#).unwrap();
        assert_eq!(m.linear_color, [1.0, 0.0, 0.5]);
        assert_eq!(m.srgb_color, m.linear_color);
        assert_eq!(m.color_hex, 0xFF0080);
    }

    #[test]
    fn test_material_too_short() {
        assert_eq!(
            decode_material(r#"1,"Short",0,1,1,1"#),
            Err(Error::TooFewFields {
                kind: "material3",
                expected: 16,
                found: 6
            })
        );
    }

    #[test]
    fn test_rejections() {
        // Unbalanced braces
        assert_eq!(
            decode_line("tube2,7,{1,0,0,0,0,0,0,3,500,20,20;"),
            Err(Error::UnbalancedBraces)
        );
        // Orientation arity
        assert_eq!(
            decode_line("tube2,7,{1,0,0,0,0,0},3,500,20,20;"),
            Err(Error::OrientationArity(6))
        );
        // Non-integer id
        assert!(matches!(
            decode_line("tube2,x7,{1,0,0,0,0,0,0},3,500,20,20;"),
            Err(Error::InvalidInteger { field: "id", .. })
        ));
        // Too few params
        assert_eq!(
            decode_line("tube2,7,{1,0,0,0,0,0,0},3,500;"),
            Err(Error::TooFewFields {
                kind: "tube2",
                expected: 4,
                found: 2
            })
        );
        // Non-numeric required field
        assert!(matches!(
            decode_line("tube2,7,{1,0,0,0,0,0,0},3,long,20,20;"),
            Err(Error::InvalidNumber { field: "length", .. })
        ));
        // Unknown keyword
        assert_eq!(
            decode_line("bolt2,7,{1,0,0,0,0,0,0},3;"),
            Err(Error::UnknownKeyword("bolt2".into()))
        );
        assert_eq!(decode_line("// comment"), Err(Error::NotARecord));
    }

    #[test]
    fn test_extra_param_rejects_every_kind() {
        let lines = [
            "connector3,1,{1,0,0,0,0,0,0},5,0,3,0,0,0,1;",
            "connector45_2,1,{1,0,0,0,0,0,0},9,1,0,1;",
            "tube2,1,{1,0,0,0,0,0,0},3,500,20,20,1;",
            "panel2,1,{1,0,0,0,0,0,0},8,400,300,19,0,0,1;",
            "clamp2,1,{1,0,0,0,0,0,0},2,1,1;",
        ];
        for line in lines {
            assert!(
                matches!(decode_line(line), Err(Error::VisibilityRange { .. })),
                "{} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_whitespace_tolerated() {
        let g = geometry("  clamp2 , 5 , { 1, 0, 0, 0, 1, 2, 3 } , 2 , 0 ");
        assert_eq!(g.id(), 5);
        assert_eq!(g.transform().position, Point3::new(1.0, 2.0, 3.0));
    }
}
