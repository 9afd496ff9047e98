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

use super::RecordSink;
use crate::core::IntervalRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default output file for [`RecordLayout::Plain`]
pub const INTERVALS_FILE: &str = "intervals.txt";
/// Default output file for [`RecordLayout::Annotated`]
pub const ANNOTATED_FILE: &str = "intervals_new.txt";

/// How each record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// `{identifier}: {delta}s`
    Plain,
    /// `{identifier}: {delta}s at {timestamp}` with the timestamp as logged
    Annotated,
}

impl RecordLayout {
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Plain => INTERVALS_FILE,
            Self::Annotated => ANNOTATED_FILE,
        }
    }

    pub fn write_record<W: Write>(self, out: &mut W, record: &IntervalRecord) -> io::Result<()> {
        let delta = record.formatted_delta();
        match self {
            Self::Plain => writeln!(out, "{}: {delta}s", record.identifier),
            Self::Annotated => writeln!(
                out,
                "{}: {delta}s at {}",
                record.identifier, record.timestamp_text
            ),
        }
    }
}

/// Writes every record, one per line
#[derive(Debug)]
pub struct IntervalWriter<W: Write> {
    out: W,
    layout: RecordLayout,
}

impl<W: Write> IntervalWriter<W> {
    pub const fn new(out: W, layout: RecordLayout) -> Self {
        Self { out, layout }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl IntervalWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write records into it
    pub fn create(path: &Path, layout: RecordLayout) -> io::Result<Self> {
        let file = File::create(path)?;
        tracing::info!("Writing intervals to {}", path.display());
        Ok(Self::new(BufWriter::new(file), layout))
    }
}

impl<W: Write> RecordSink for IntervalWriter<W> {
    fn accept(&mut self, record: &IntervalRecord) -> io::Result<bool> {
        self.layout.write_record(&mut self.out, record)?;
        Ok(true)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scan;

    const LOG: &str = "\
2026-01-08 07:02:25.100 INFO Scheduled next change for zoneA in 300s
2026-01-08 07:02:25.200 INFO Scheduled next change for zoneB in 300s
2026-01-08 07:02:25.350 INFO Scheduled next change for zoneA in 300s
2026-01-08 07:02:25.350 INFO Scheduled next change for zoneB in 300s
";

    fn lines() -> impl Iterator<Item = io::Result<String>> {
        LOG.lines().map(|l| Ok(l.to_string()))
    }

    #[test]
    fn test_plain_layout() {
        let mut writer = IntervalWriter::new(Vec::new(), RecordLayout::Plain);
        let summary = scan(lines(), &mut writer).expect("scan");
        assert_eq!(summary.written, 2);
        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        assert_eq!(text, "zoneA: 0.250s\nzoneB: 0.150s\n");
    }

    #[test]
    fn test_annotated_layout() {
        let mut writer = IntervalWriter::new(Vec::new(), RecordLayout::Annotated);
        scan(lines(), &mut writer).expect("scan");
        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        assert_eq!(
            text,
            "zoneA: 0.250s at 2026-01-08 07:02:25.350\n\
             zoneB: 0.150s at 2026-01-08 07:02:25.350\n"
        );
    }

    #[test]
    fn test_create_truncates_previous_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(INTERVALS_FILE);
        std::fs::write(&path, "stale line from an earlier run\n".repeat(10)).expect("seed");

        let mut writer = IntervalWriter::create(&path, RecordLayout::Plain).expect("create");
        scan(lines(), &mut writer).expect("scan");
        drop(writer);

        let text = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(text, "zoneA: 0.250s\nzoneB: 0.150s\n");
    }

    #[test]
    fn test_no_records_yields_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(ANNOTATED_FILE);
        let mut writer = IntervalWriter::create(&path, RecordLayout::Annotated).expect("create");
        let boot = Ok::<_, io::Error>("2026-01-08 07:02:25.100 INFO boot".to_string());
        let summary = scan(std::iter::once(boot), &mut writer).expect("scan");
        assert_eq!(summary.written, 0);
        drop(writer);
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "");
    }
}
