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

//! Measure how often the kaleidux daemon reschedules content per output.
//!
//! The daemon logs `Scheduled next change for <output>` every time it queues
//! the next wallpaper. This crate pairs consecutive events of the same output
//! and reports the time between them, either as a full listing or filtered
//! down to suspicious bursts.

pub mod config;
pub mod core;
pub mod output;
pub mod parser;
