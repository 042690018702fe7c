// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

/// Processing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// Record lines at or above which decoding runs on the rayon pool.
    pub parallel_threshold: usize,
    /// Largest accepted input, in bytes.
    pub max_input_bytes: usize,
    /// Rejections kept verbatim in diagnostics (the rest are only counted).
    pub max_reported_rejections: usize,
}

const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;
const DEFAULT_MAX_INPUT_MB: usize = 64;
const DEFAULT_MAX_REPORTED_REJECTIONS: usize = 50;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl ProcessingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            parallel_threshold: env_or("QDF_PARALLEL_THRESHOLD", DEFAULT_PARALLEL_THRESHOLD),
            max_input_bytes: env_or("QDF_MAX_INPUT_MB", DEFAULT_MAX_INPUT_MB) * 1024 * 1024,
            max_reported_rejections: env_or(
                "QDF_MAX_REPORTED_REJECTIONS",
                DEFAULT_MAX_REPORTED_REJECTIONS,
            ),
        }
    }

    /// Built-in defaults, ignoring the environment.
    pub fn defaults() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_input_bytes: DEFAULT_MAX_INPUT_MB * 1024 * 1024,
            max_reported_rejections: DEFAULT_MAX_REPORTED_REJECTIONS,
        }
    }

    /// Never use the rayon pool.
    pub fn sequential(mut self) -> Self {
        self.parallel_threshold = usize::MAX;
        self
    }

    /// Always use the rayon pool.
    pub fn parallel(mut self) -> Self {
        self.parallel_threshold = 0;
        self
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
