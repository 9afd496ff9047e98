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

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File name the daemon log is expected under when no path is given
pub const DEFAULT_LOG_FILE: &str = "kaleidux-daemon-2026-01-08_07-02-25.log";

const DAEMON_LOG_PREFIX: &str = "kaleidux-daemon-";
const DAEMON_LOG_SUFFIX: &str = ".log";

/// Line iterator that tolerates non-UTF-8 bytes.
///
/// Invalid sequences are replaced with U+FFFD instead of aborting the scan.
/// Trailing `\n` / `\r\n` are stripped.
#[derive(Debug)]
pub struct LossyLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open a log file for line-by-line reading
pub fn open_log(path: &Path) -> io::Result<LossyLines<BufReader<File>>> {
    let file = File::open(path)?;
    tracing::debug!("Opened {}", path.display());
    Ok(LossyLines::new(BufReader::new(file)))
}

/// Directory the daemon writes its log files to (`<config>/kaleidux/logs`)
#[must_use]
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kaleidux").join("logs"))
}

/// Find the newest daemon log in `dir`.
///
/// Daemon log names embed their start time (`kaleidux-daemon-%Y-%m-%d_%H-%M-%S.log`),
/// so the lexicographically greatest name is the most recent run.
pub fn find_latest_log(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut latest: Option<(String, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_daemon_log_name(&name) || !entry.file_type()?.is_file() {
            continue;
        }
        if latest.as_ref().is_none_or(|(best, _)| name > *best) {
            latest = Some((name, entry.path()));
        }
    }

    match &latest {
        Some((_, path)) => tracing::info!("Latest daemon log: {}", path.display()),
        None => tracing::warn!("No daemon logs found in {}", dir.display()),
    }
    Ok(latest.map(|(_, path)| path))
}

fn is_daemon_log_name(name: &str) -> bool {
    name.len() > DAEMON_LOG_PREFIX.len() + DAEMON_LOG_SUFFIX.len()
        && name.starts_with(DAEMON_LOG_PREFIX)
        && name.ends_with(DAEMON_LOG_SUFFIX)
}
