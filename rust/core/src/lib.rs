// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # QDF-Lite Core Decoder
//!
//! Decoder for QDF, the line-oriented interchange format for modular frame
//! and furniture assemblies (connectors, tubes, panels, clamps, slides,
//! wheels and materials). Tokenizing is built with [nom](https://docs.rs/nom)
//! and [memchr](https://docs.rs/memchr); orientation math uses
//! [nalgebra](https://docs.rs/nalgebra).
//!
//! ## Overview
//!
//! - **Tokenizing**: brace-block extraction and quoted CSV splitting
//! - **Orientation Decoding**: signed-square quaternion decompression with a
//!   fixed axis correction
//! - **Per-Kind Decoders**: typed records with field validation
//! - **Topology Classification**: connector shape from a 6-bit direction mask
//! - **Assembly**: one immutable [`QdfModel`] per input text
//!
//! ## Quick Start
//!
//! ```rust
//! use qdf_lite_core::{parse_qdf, ConnectorTopology};
//!
//! let model = parse_qdf("connector3,1,{0,0,0,1,100,200,300},5,0,3,0,0,0;");
//! let connector = model.connectors3().next().unwrap();
//! assert_eq!(connector.id, 1);
//! assert_eq!(connector.topology(), ConnectorTopology::Straight);
//! ```
//!
//! Invalid records never fail the parse. Callers that need to know why a line
//! was dropped can run [`decode_line`] themselves and inspect the [`Error`].
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for the model

pub mod assembly;
pub mod decoder;
pub mod error;
pub mod fast_parse;
pub mod model;
pub mod orientation;
pub mod parser;
pub mod schema;
pub mod topology;

pub use assembly::{parse_qdf, AssemblyBuilder};
pub use decoder::{decode_kind, decode_line, decode_record, Record};
pub use error::{Error, ErrorCategory, Result};
pub use model::{
    ClampLike, Connector3, Connector45, Geometry, Material, PanelLike, QdfModel, ShadingHints,
    Tube,
};
pub use orientation::{
    forward_squared_scaling, reverse_squared_scaling, OrientationRaw, Transform,
};
pub use parser::{classify_line, split_brace_block, split_quoted_csv, Line, RawRecord, RecordScanner};
pub use schema::{ClampKind, GeometryKind, PanelKind, RecordKind};
pub use topology::{classify_connector, directions, ConnectorDirection, ConnectorTopology};
