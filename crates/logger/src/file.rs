//! File sink and its attachment options

use crate::{Error, Formatter, Level, Record, Result, Sink};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How an existing log file is treated when the sink opens it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    /// Keep existing content and write after it (`"a"`)
    #[default]
    Append,
    /// Discard existing content (`"w"`)
    Truncate,
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" | "append" => Ok(Self::Append),
            "w" | "truncate" => Ok(Self::Truncate),
            other => Err(Error::InvalidFileMode(other.to_string())),
        }
    }
}

/// Options for [`DistributedLogger::attach_file_sink`](crate::DistributedLogger::attach_file_sink)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkOptions {
    /// Append to or truncate an existing file
    pub mode: FileMode,
    /// Threshold of the file sink
    pub level: Level,
}

impl FileSinkOptions {
    /// Parse the string forms `"a"`/`"w"` and a level name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFileMode`] or [`Error::InvalidLevel`].
    pub fn parse(mode: &str, level: &str) -> Result<Self> {
        Ok(Self {
            mode: mode.parse()?,
            level: level.parse()?,
        })
    }

    /// Builder-style method for setting the mode
    #[must_use]
    pub const fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style method for setting the threshold
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Sink that writes formatted lines to a plain text file
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    threshold: Level,
    formatter: Formatter,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateDirectory`] or [`Error::OpenFile`].
    pub fn open(
        path: impl AsRef<Path>,
        mode: FileMode,
        threshold: Level,
        formatter: Formatter,
    ) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut options = OpenOptions::new();
        match mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.write(true).truncate(true),
        };
        let file = options
            .create(true)
            .open(path)
            .map_err(|source| Error::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            threshold,
            formatter,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn emit(&self, record: &Record<'_>) {
        let line = self.formatter.format(record);
        let _ = writeln!(self.writer.lock(), "{line}");
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }

    #[inline(always)]
    fn threshold(&self) -> Level {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("a".parse::<FileMode>().unwrap(), FileMode::Append);
        assert_eq!("w".parse::<FileMode>().unwrap(), FileMode::Truncate);
        assert!(matches!(
            "rw".parse::<FileMode>(),
            Err(Error::InvalidFileMode(mode)) if mode == "rw"
        ));
    }

    #[test]
    fn test_options_parse() {
        let options = FileSinkOptions::parse("w", "DEBUG").unwrap();
        assert_eq!(options.mode, FileMode::Truncate);
        assert_eq!(options.level, Level::Debug);

        assert!(matches!(
            FileSinkOptions::parse("a", "TRACE"),
            Err(Error::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_default_options() {
        let options = FileSinkOptions::default();
        assert_eq!(options.mode, FileMode::Append);
        assert_eq!(options.level, Level::Info);
    }
}
