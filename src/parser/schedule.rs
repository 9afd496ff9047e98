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

use chrono::{NaiveDateTime, Timelike};
use fancy_regex::Regex;
use std::sync::LazyLock;

/// Layout of the daemon's log timestamps: `YYYY-MM-DD HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// Timestamp anywhere in the line, then (greedily) the last scheduling phrase
// and the output name that follows it.
static SCHEDULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}).*Scheduled next change for (\S+)")
        .expect("valid regex literal")
});

/// Captures of a scheduling line, borrowed from the line itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleMatch<'a> {
    /// Timestamp text exactly as it appears in the log
    pub timestamp: &'a str,
    /// Output name the change was scheduled for
    pub identifier: &'a str,
}

impl ScheduleMatch<'_> {
    /// Parse the captured timestamp.
    ///
    /// The pattern only guarantees the shape, so calendar-invalid values such
    /// as month 13 still fail here.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.timestamp)
    }
}

/// Match a raw log line against the scheduling pattern
#[must_use]
pub fn match_schedule(line: &str) -> Option<ScheduleMatch<'_>> {
    let caps = SCHEDULE_PATTERN.captures(line).ok()??;
    let timestamp = caps.get(1)?.as_str();
    let identifier = caps.get(2)?.as_str();
    Some(ScheduleMatch {
        timestamp,
        identifier,
    })
}

/// Parse a `YYYY-MM-DD HH:MM:SS.mmm` timestamp.
///
/// Second `60` is rejected: chrono reads it as a leap second, but the daemon
/// never writes one.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .filter(|ts| ts.nanosecond() < 1_000_000_000)
}
