// Kaleidux Intervals - GPL-3.0-or-later
// This file is part of Kaleidux Intervals.
//
// Copyright (C) 2026 The Kaleidux Intervals authors
//
// Kaleidux Intervals is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Kaleidux Intervals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Kaleidux Intervals.  If not, see <https://www.gnu.org/licenses/>.

//! Interval extraction between consecutive scheduling events.
//!
//! An [`IntervalExtractor`] lives for exactly one scan. It remembers when each
//! output was last scheduled and emits an [`IntervalRecord`] whenever the same
//! output shows up again.

use crate::parser::match_schedule;
use chrono::{NaiveDateTime, TimeDelta};
use std::collections::HashMap;
use std::fmt;
use std::io;

/// Deltas strictly below this are reported as bursts
pub const BURST_THRESHOLD: TimeDelta = TimeDelta::milliseconds(200);

/// Elapsed time between two consecutive scheduling events of one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    pub identifier: String,
    /// Signed: out-of-order log lines produce zero or negative deltas
    pub delta: TimeDelta,
    /// Timestamp of the second occurrence
    pub timestamp: NaiveDateTime,
    /// The second occurrence's timestamp exactly as logged
    pub timestamp_text: String,
    /// 1-based line number of the second occurrence
    pub line_number: usize,
}

impl IntervalRecord {
    /// Whether the two events were less than [`BURST_THRESHOLD`] apart.
    ///
    /// Negative deltas count as bursts.
    #[must_use]
    pub fn is_burst(&self) -> bool {
        self.delta < BURST_THRESHOLD
    }

    /// Delta rendered as seconds with millisecond precision, e.g. `0.250`
    #[must_use]
    pub fn formatted_delta(&self) -> FormattedDelta {
        FormattedDelta(self.delta)
    }
}

/// Display adapter for a delta: seconds with exactly three decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedDelta(pub TimeDelta);

impl fmt::Display for FormattedDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Timestamps only carry milliseconds
        let millis = self.0.num_milliseconds();
        let sign = if millis < 0 { "-" } else { "" };
        let abs = millis.unsigned_abs();
        write!(f, "{sign}{}.{:03}", abs / 1000, abs % 1000)
    }
}

/// Counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractorStats {
    pub lines: usize,
    pub matched: usize,
    /// Matched lines whose timestamp failed to parse
    pub invalid_timestamps: usize,
    pub records: usize,
}

/// Per-scan state: the last time each output was scheduled
#[derive(Debug, Default)]
pub struct IntervalExtractor {
    last_seen: HashMap<String, NaiveDateTime>,
    stats: ExtractorStats,
}

impl IntervalExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, returning a record if the line repeats a known output.
    ///
    /// Lines that do not match, or whose timestamp is not a real calendar
    /// time, are skipped and leave the last-seen map untouched.
    pub fn process_line(&mut self, line: &str, line_number: usize) -> Option<IntervalRecord> {
        self.stats.lines += 1;

        let matched = match_schedule(line)?;
        self.stats.matched += 1;

        let Some(timestamp) = matched.parsed_timestamp() else {
            self.stats.invalid_timestamps += 1;
            tracing::debug!(
                "Skipping line {line_number}: invalid timestamp {:?}",
                matched.timestamp
            );
            return None;
        };

        let record = self
            .last_seen
            .get(matched.identifier)
            .map(|&previous| IntervalRecord {
                identifier: matched.identifier.to_string(),
                delta: timestamp - previous,
                timestamp,
                timestamp_text: matched.timestamp.to_string(),
                line_number,
            });

        // Always overwrite, even when no record was produced
        self.last_seen
            .insert(matched.identifier.to_string(), timestamp);

        if record.is_some() {
            self.stats.records += 1;
        }
        record
    }

    /// Most recent timestamp seen for an output
    #[must_use]
    pub fn last_seen(&self, identifier: &str) -> Option<NaiveDateTime> {
        self.last_seen.get(identifier).copied()
    }

    /// Number of distinct outputs seen so far
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.last_seen.len()
    }

    #[must_use]
    pub const fn stats(&self) -> ExtractorStats {
        self.stats
    }

    /// Turn a fallible line source into a lazy stream of records.
    ///
    /// Read errors are yielded as-is; the caller decides whether to stop.
    pub fn records<I>(self, lines: I) -> Intervals<I>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        Intervals {
            extractor: self,
            lines,
            line_number: 0,
        }
    }
}

/// Iterator returned by [`IntervalExtractor::records`]
#[derive(Debug)]
pub struct Intervals<I> {
    extractor: IntervalExtractor,
    lines: I,
    line_number: usize,
}

impl<I> Intervals<I> {
    pub fn into_extractor(self) -> IntervalExtractor {
        self.extractor
    }
}

impl<I> Iterator for Intervals<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<IntervalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;
            if let Some(record) = self.extractor.process_line(&line, self.line_number) {
                return Some(Ok(record));
            }
        }
    }
}
