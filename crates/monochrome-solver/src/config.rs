// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Solver Configuration
//!
//! [`SolverConfig`] collects every knob of a run. It is a plain value with
//! builder-style setters; [`SolverConfig::validate`] rejects combinations the
//! workers cannot run with.
//!
//! | field                 | default     |
//! |-----------------------|-------------|
//! | `max_advances`        | 4           |
//! | `sampler_attempts`    | 5 000 000   |
//! | `score_ceiling`       | 99 999      |
//! | `mode`                | `Combined`  |
//! | `max_sequence_length` | 30          |
//! | `wave_size`           | 10          |
//! | `rules`               | reference   |

use monochrome_bnb::bnb::{DEFAULT_MAX_SEQUENCE_LENGTH, DEFAULT_WAVE_SIZE};
use monochrome_model::{
    cost::{IMPOSSIBLE_SCORE, Score},
    rules::ShopRules,
};
use thiserror::Error;

pub const DEFAULT_MAX_ADVANCES: u32 = 4;
pub const DEFAULT_SAMPLER_ATTEMPTS: u64 = 5_000_000;

/// Which strategies are launched for every pre-advance offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SearchMode {
    /// Exhaustive branch-and-bound only.
    BranchAndBound,
    /// Random rollouts only.
    Sampler,
    /// Both strategies, sharing one incumbent.
    #[default]
    Combined,
}

impl SearchMode {
    #[inline]
    pub const fn runs_branch_and_bound(self) -> bool {
        matches!(self, SearchMode::BranchAndBound | SearchMode::Combined)
    }

    #[inline]
    pub const fn runs_sampler(self) -> bool {
        matches!(self, SearchMode::Sampler | SearchMode::Combined)
    }

    /// Number of workers launched per offset.
    #[inline]
    pub const fn workers_per_offset(self) -> usize {
        match self {
            SearchMode::Combined => 2,
            SearchMode::BranchAndBound | SearchMode::Sampler => 1,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::BranchAndBound => f.write_str("branch-and-bound"),
            SearchMode::Sampler => f.write_str("sampler"),
            SearchMode::Combined => f.write_str("combined"),
        }
    }
}

/// Error returned when parsing a [`SearchMode`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search mode `{0}` (expected `deep`, `heuristic` or `combined`)")]
pub struct ParseSearchModeError(pub String);

impl std::str::FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deep" | "bnb" | "branch-and-bound" => Ok(SearchMode::BranchAndBound),
            "heuristic" | "sampler" => Ok(SearchMode::Sampler),
            "combined" => Ok(SearchMode::Combined),
            _ => Err(ParseSearchModeError(s.to_string())),
        }
    }
}

/// A configuration the solver refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("wave size must be at least 1")]
    ZeroWaveSize,
    #[error("maximum sequence length must be at least 1")]
    ZeroMaxSequenceLength,
    #[error("sampler-only mode needs at least one attempt")]
    NoSamplerAttempts,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SolverConfig {
    /// Offsets `0..=max_advances` are searched.
    pub max_advances: u32,
    /// Rollouts per offset.
    pub sampler_attempts: u64,
    /// Initial incumbent score. Only sequences strictly below it are reported.
    pub score_ceiling: Score,
    pub mode: SearchMode,
    /// Upper limit on steps per sequence, pre-advances included.
    pub max_sequence_length: usize,
    /// Plies per branch-and-bound wave.
    pub wave_size: usize,
    pub rules: ShopRules,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_advances: DEFAULT_MAX_ADVANCES,
            sampler_attempts: DEFAULT_SAMPLER_ATTEMPTS,
            score_ceiling: IMPOSSIBLE_SCORE,
            mode: SearchMode::default(),
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            wave_size: DEFAULT_WAVE_SIZE,
            rules: ShopRules::default(),
        }
    }
}

impl SolverConfig {
    #[inline]
    pub fn with_max_advances(mut self, max_advances: u32) -> Self {
        self.max_advances = max_advances;
        self
    }

    #[inline]
    pub fn with_sampler_attempts(mut self, attempts: u64) -> Self {
        self.sampler_attempts = attempts;
        self
    }

    #[inline]
    pub fn with_score_ceiling(mut self, ceiling: Score) -> Self {
        self.score_ceiling = ceiling;
        self
    }

    #[inline]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    #[inline]
    pub fn with_wave_size(mut self, wave_size: usize) -> Self {
        self.wave_size = wave_size;
        self
    }

    #[inline]
    pub fn with_rules(mut self, rules: ShopRules) -> Self {
        self.rules = rules;
        self
    }

    /// Number of worker threads a run with this configuration launches.
    #[inline]
    pub fn worker_count(&self) -> usize {
        (self.max_advances as usize + 1) * self.mode.workers_per_offset()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode.runs_branch_and_bound() && self.wave_size == 0 {
            return Err(ConfigError::ZeroWaveSize);
        }
        if self.max_sequence_length == 0 {
            return Err(ConfigError::ZeroMaxSequenceLength);
        }
        if self.mode == SearchMode::Sampler && self.sampler_attempts == 0 {
            return Err(ConfigError::NoSamplerAttempts);
        }
        Ok(())
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Configuration:")?;
        writeln!(f, "  Mode: {}", self.mode)?;
        writeln!(f, "  Advances: 0..={}", self.max_advances)?;
        writeln!(f, "  Sampler Attempts: {}", self.sampler_attempts)?;
        writeln!(f, "  Score Ceiling: {}", self.score_ceiling)?;
        writeln!(f, "  Max Sequence Length: {}", self.max_sequence_length)?;
        writeln!(f, "  Wave Size: {}", self.wave_size)?;
        writeln!(f, "  Rules: {}", self.rules)
    }
}
