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
use std::io::{self, Write};

/// Reports only records closer together than the burst threshold
#[derive(Debug)]
pub struct BurstReporter<W: Write> {
    out: W,
}

impl<W: Write> BurstReporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for BurstReporter<W> {
    fn accept(&mut self, record: &IntervalRecord) -> io::Result<bool> {
        if !record.is_burst() {
            return Ok(false);
        }
        tracing::debug!(
            "Burst on {} at line {}",
            record.identifier,
            record.line_number
        );
        writeln!(
            self.out,
            "BURST DETECTED for {}: {}s at {}",
            record.identifier,
            record.formatted_delta(),
            record.timestamp_text
        )?;
        Ok(true)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
