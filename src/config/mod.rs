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

use crate::core::default_log_dir;
use crate::output::RecordLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration stored in the config directory
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    /// Where to look for daemon logs with `--latest`
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Output file for plain intervals
    #[serde(default)]
    pub intervals_output: Option<PathBuf>,

    /// Output file for annotated intervals
    #[serde(default)]
    pub annotated_output: Option<PathBuf>,
}

impl UserConfig {
    /// Get the path to the config file
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kaleidux-intervals").join("config.json"))
    }

    /// Load config from the default location, returning defaults if absent
    #[must_use]
    pub fn load() -> Self {
        Self::config_path().map_or_else(Self::default, |path| Self::load_from(&path))
    }

    /// Load config from `path`, returning defaults if absent or malformed
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        tracing::info!("Loading config from {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Directory searched for daemon logs
    #[must_use]
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir.clone().or_else(default_log_dir)
    }

    /// Output file for the given layout
    #[must_use]
    pub fn output_for(&self, layout: RecordLayout) -> PathBuf {
        let configured = match layout {
            RecordLayout::Plain => self.intervals_output.as_ref(),
            RecordLayout::Annotated => self.annotated_output.as_ref(),
        };
        configured.map_or_else(|| PathBuf::from(layout.default_file_name()), Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = UserConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config, UserConfig::default());
        assert_eq!(
            config.output_for(RecordLayout::Plain),
            PathBuf::from("intervals.txt")
        );
        assert_eq!(
            config.output_for(RecordLayout::Annotated),
            PathBuf::from("intervals_new.txt")
        );
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "log_dir": "/var/log/kaleidux",
                "annotated_output": "/tmp/annotated.txt"
            }"#,
        )
        .expect("write");

        let loaded = UserConfig::load_from(&path);
        assert_eq!(
            loaded,
            UserConfig {
                log_dir: Some(PathBuf::from("/var/log/kaleidux")),
                intervals_output: None,
                annotated_output: Some(PathBuf::from("/tmp/annotated.txt")),
            }
        );
        assert_eq!(loaded.log_dir(), Some(PathBuf::from("/var/log/kaleidux")));
        assert_eq!(
            loaded.output_for(RecordLayout::Annotated),
            PathBuf::from("/tmp/annotated.txt")
        );
        assert_eq!(
            loaded.output_for(RecordLayout::Plain),
            PathBuf::from("intervals.txt")
        );
    }

    #[test]
    fn test_partial_and_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{ "intervals_output": "out.txt" }"#).expect("write");
        let config = UserConfig::load_from(&path);
        assert_eq!(config.intervals_output, Some(PathBuf::from("out.txt")));
        assert!(config.log_dir.is_none());

        std::fs::write(&path, "{ not json").expect("write");
        assert_eq!(UserConfig::load_from(&path), UserConfig::default());
    }
}
