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

//! Output policies for interval records.

pub mod burst;
pub mod interval_file;

pub use burst::BurstReporter;
pub use interval_file::{IntervalWriter, RecordLayout};

use crate::core::IntervalRecord;
use std::io;

/// Destination for interval records
pub trait RecordSink {
    /// Handle one record. Returns whether the record was written.
    fn accept(&mut self, record: &IntervalRecord) -> io::Result<bool>;

    /// Flush anything buffered. Called once after the last record.
    fn finish(&mut self) -> io::Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn accept(&mut self, record: &IntervalRecord) -> io::Result<bool> {
        (**self).accept(record)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}
