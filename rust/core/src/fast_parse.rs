// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scalar field parsing
//!
//! Whole-token number parsing for record parameters. Floats go through
//! fast-float, integers through lexical-core; both reject trailing garbage.

use crate::error::{Error, Result};

/// Parse a whole token as a finite `f64`
#[inline]
pub fn parse_f64(field: &'static str, token: &str) -> Result<f64> {
    match fast_float::parse::<f64, _>(token.trim()) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::invalid_number(field, token)),
    }
}

/// Parse a whole token as an `i64`
#[inline]
pub fn parse_i64(field: &'static str, token: &str) -> Result<i64> {
    lexical_core::parse::<i64>(token.trim().as_bytes())
        .map_err(|_| Error::invalid_integer(field, token))
}

/// Parse a whole token as a `u32` (bitmasks)
#[inline]
pub fn parse_u32(field: &'static str, token: &str) -> Result<u32> {
    lexical_core::parse::<u32>(token.trim().as_bytes())
        .map_err(|_| Error::invalid_integer(field, token))
}
