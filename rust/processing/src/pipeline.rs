// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QDF processing pipeline
//!
//! Scans the text once, decodes record lines (on the rayon pool for large
//! inputs), then feeds the outcomes to the core [`AssemblyBuilder`] in source
//! order. The resulting model is identical to [`qdf_lite_core::parse_qdf`].

use std::path::Path;
use std::time::Instant;

use qdf_lite_core::{decode_record, AssemblyBuilder, QdfModel, RawRecord, Record, RecordScanner};
use rayon::prelude::*;

use crate::config::ProcessingConfig;
use crate::diagnostics::ParseDiagnostics;
use crate::error::{Error, Result};

/// A decoded model together with what was dropped on the way
#[derive(Debug, Clone)]
pub struct ProcessedModel {
    pub model: QdfModel,
    pub diagnostics: ParseDiagnostics,
}

/// Decode every record line. Indexed collect keeps input order on both paths.
fn decode_all(records: &[RawRecord<'_>], parallel_threshold: usize) -> Vec<qdf_lite_core::Result<Record>> {
    if records.len() >= parallel_threshold {
        records
            .par_iter()
            .map(|r| decode_record(r.keyword, r.body))
            .collect()
    } else {
        records
            .iter()
            .map(|r| decode_record(r.keyword, r.body))
            .collect()
    }
}

/// Decode QDF text into a model plus diagnostics
pub fn process_qdf(content: &str, config: &ProcessingConfig) -> Result<ProcessedModel> {
    if content.len() > config.max_input_bytes {
        return Err(Error::InputTooLarge {
            size: content.len(),
            max: config.max_input_bytes,
        });
    }

    let _span = tracing::info_span!("process_qdf", bytes = content.len()).entered();
    let start = Instant::now();

    let mut scanner = RecordScanner::new(content);
    let records: Vec<RawRecord<'_>> = scanner.by_ref().collect();
    let parallel = records.len() >= config.parallel_threshold;

    let mut diagnostics = ParseDiagnostics {
        total_lines: scanner.skipped() + records.len(),
        skipped_lines: scanner.skipped(),
        ..ParseDiagnostics::default()
    };

    let outcomes = decode_all(&records, config.parallel_threshold);

    let mut builder = AssemblyBuilder::new();
    for (raw, outcome) in records.iter().zip(outcomes) {
        match outcome {
            Ok(record) => {
                diagnostics.record_accepted(raw.keyword);
                builder.push(record);
            }
            Err(error) => diagnostics.record_error(
                raw.line_number,
                raw.keyword,
                &error,
                config.max_reported_rejections,
            ),
        }
    }
    let model = builder.finish(content);

    tracing::info!(
        lines = diagnostics.total_lines,
        geometries = model.geometries().len(),
        materials = model.materials().len(),
        rejected = diagnostics.rejected_total(),
        unknown = diagnostics.unknown_keyword_lines,
        parallel,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "QDF decoded"
    );

    Ok(ProcessedModel { model, diagnostics })
}

/// Decode raw bytes; a leading UTF-8 byte-order mark is ignored
pub fn process_bytes(bytes: &[u8], config: &ProcessingConfig) -> Result<ProcessedModel> {
    if bytes.len() > config.max_input_bytes {
        return Err(Error::InputTooLarge {
            size: bytes.len(),
            max: config.max_input_bytes,
        });
    }
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let content = std::str::from_utf8(bytes)?;
    process_qdf(content, config)
}

/// Read and decode a local `.qdf` file
pub fn process_file(path: impl AsRef<Path>, config: &ProcessingConfig) -> Result<ProcessedModel> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len() as usize;
    if size > config.max_input_bytes {
        return Err(Error::InputTooLarge {
            size,
            max: config.max_input_bytes,
        });
    }

    tracing::debug!(path = %path.display(), size, "reading QDF file");
    let bytes = std::fs::read(path)?;
    process_bytes(&bytes, config)
}
