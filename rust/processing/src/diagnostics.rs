// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-run decode diagnostics
//!
//! The core decoder drops bad records without a trace. This module keeps the
//! tally for callers that want to know what was dropped and why.

use std::collections::BTreeMap;

use qdf_lite_core::{Error, ErrorCategory};
use serde::Serialize;

/// One rejected record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub line_number: usize,
    pub keyword: String,
    pub category: ErrorCategory,
    pub reason: String,
}

/// Counts of what happened to every line of one input
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseDiagnostics {
    pub total_lines: usize,
    /// Blank, header and comment lines
    pub skipped_lines: usize,
    pub unknown_keyword_lines: usize,
    /// Accepted records by keyword as written
    pub accepted: BTreeMap<String, usize>,
    /// Rejected records by category name
    pub rejected: BTreeMap<&'static str, usize>,
    /// First rejections, up to the configured cap
    pub rejections: Vec<Rejection>,
}

impl ParseDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&mut self, keyword: &str) {
        *self.accepted.entry(keyword.to_string()).or_insert(0) += 1;
    }

    /// Count a decode failure; the first `cap` are kept with their message
    pub fn record_error(&mut self, line_number: usize, keyword: &str, error: &Error, cap: usize) {
        let category = error.category();
        if category == ErrorCategory::Skipped {
            self.unknown_keyword_lines += 1;
            tracing::trace!(line = line_number, keyword, "unknown keyword skipped");
            return;
        }

        tracing::debug!(
            line = line_number,
            keyword,
            category = category.as_str(),
            %error,
            "record rejected"
        );

        *self.rejected.entry(category.as_str()).or_insert(0) += 1;
        if self.rejections.len() < cap {
            self.rejections.push(Rejection {
                line_number,
                keyword: keyword.to_string(),
                category,
                reason: error.to_string(),
            });
        }
    }

    pub fn accepted_total(&self) -> usize {
        self.accepted.values().sum()
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn rejected_in(&self, category: ErrorCategory) -> usize {
        self.rejected.get(category.as_str()).copied().unwrap_or(0)
    }
}
