// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared QDF processing pipeline.
//!
//! Wraps the core decoder with the pieces an application needs around it:
//! parallel decoding for large files, rejection diagnostics, a material
//! lookup table, serializable summaries and environment-driven configuration.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod materials;
pub mod pipeline;
pub mod summary;

pub use config::ProcessingConfig;
pub use diagnostics::{ParseDiagnostics, Rejection};
pub use error::{Error, Result};
pub use materials::MaterialTable;
pub use pipeline::{process_bytes, process_file, process_qdf, ProcessedModel};
pub use summary::{Bounds, ModelSummary};
