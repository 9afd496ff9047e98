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

use super::extractor::{ExtractorStats, IntervalExtractor};
use crate::output::RecordSink;
use std::fmt;
use std::io;

/// Outcome of a completed scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub stats: ExtractorStats,
    /// Outputs that appeared at least once
    pub identifiers: usize,
    /// Records the sink actually wrote
    pub written: usize,
}

/// A scan aborted on an I/O failure
#[derive(Debug)]
pub enum ScanError {
    Read(io::Error),
    Write(io::Error),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Failed to read log: {e}"),
            Self::Write(e) => write!(f, "Failed to write output: {e}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) | Self::Write(e) => Some(e),
        }
    }
}

/// Run one extractor over `lines`, handing every record to `sink`.
///
/// Stops at the first read or write failure. Whatever the sink already wrote
/// stays written.
pub fn scan<I, S>(lines: I, mut sink: S) -> Result<ScanSummary, ScanError>
where
    I: Iterator<Item = io::Result<String>>,
    S: RecordSink,
{
    let start = std::time::Instant::now();
    let mut written = 0;

    let mut records = IntervalExtractor::new().records(lines);
    for record in records.by_ref() {
        let record = record.map_err(ScanError::Read)?;
        if sink.accept(&record).map_err(ScanError::Write)? {
            written += 1;
        }
    }
    sink.finish().map_err(ScanError::Write)?;

    let extractor = records.into_extractor();
    let summary = ScanSummary {
        stats: extractor.stats(),
        identifiers: extractor.tracked(),
        written,
    };
    tracing::info!(
        "Scanned {} lines in {:?}: {} scheduling events, {} outputs, {} intervals, {} written, {} invalid timestamps",
        summary.stats.lines,
        start.elapsed(),
        summary.stats.matched,
        summary.identifiers,
        summary.stats.records,
        summary.written,
        summary.stats.invalid_timestamps
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IntervalRecord;

    /// Sink that remembers identifiers and can be told to fail
    #[derive(Default)]
    struct Recording {
        seen: Vec<String>,
        fail_on_accept: bool,
        finished: bool,
    }

    impl RecordSink for Recording {
        fn accept(&mut self, record: &IntervalRecord) -> io::Result<bool> {
            if self.fail_on_accept {
                return Err(io::Error::other("disk full"));
            }
            self.seen.push(record.identifier.clone());
            Ok(true)
        }

        fn finish(&mut self) -> io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn events() -> Vec<io::Result<String>> {
        [
            "2026-01-08 07:00:00.000 INFO Scheduled next change for DP-1",
            "2026-01-08 07:00:00.000 INFO Scheduled next change for HDMI-A-1",
            "garbage",
            "2026-13-40 07:00:00.000 INFO Scheduled next change for DP-1",
            "2026-01-08 07:05:00.000 INFO Scheduled next change for DP-1",
        ]
        .into_iter()
        .map(|l| Ok(l.to_string()))
        .collect()
    }

    #[test]
    fn test_summary() {
        let mut sink = Recording::default();
        let summary = scan(events().into_iter(), &mut sink).expect("scan");
        assert_eq!(summary.stats.lines, 5);
        assert_eq!(summary.stats.matched, 4);
        assert_eq!(summary.stats.invalid_timestamps, 1);
        assert_eq!(summary.stats.records, 1);
        assert_eq!(summary.identifiers, 2);
        assert_eq!(summary.written, 1);
        assert_eq!(sink.seen, vec!["DP-1"]);
        assert!(sink.finished);
    }

    #[test]
    fn test_read_failure_aborts() {
        let mut lines = events();
        lines.insert(1, Err(io::Error::new(io::ErrorKind::InvalidData, "bad sector")));
        let mut sink = Recording::default();
        let err = scan(lines.into_iter(), &mut sink).expect_err("read error");
        assert!(matches!(err, ScanError::Read(_)));
        assert!(sink.seen.is_empty());
        assert!(!sink.finished);
    }

    #[test]
    fn test_write_failure_aborts() {
        let mut sink = Recording {
            fail_on_accept: true,
            ..Recording::default()
        };
        let err = scan(events().into_iter(), &mut sink).expect_err("write error");
        assert!(matches!(err, ScanError::Write(_)));
        assert_eq!(err.to_string(), "Failed to write output: disk full");
    }
}
