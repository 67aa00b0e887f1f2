//! Output destination of a JUnit XML report.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::{WriterError, WriterResult};

/// Output destination of a [`JUnit`] report, opened once the run starts.
///
/// [`JUnit`]: super::JUnit
pub enum Sink<Out> {
    /// No output at all: the report is accumulated, but never written.
    Null,

    /// Already opened output.
    Output(Out),

    /// Output to be opened at the given `path`.
    ///
    /// If the `path` points to an existing directory, the report is created
    /// inside it, named after the time the run has started.
    File {
        /// Path of a report file or a directory to put it into.
        path: PathBuf,

        /// Function opening the resolved file path.
        open: fn(&Path) -> io::Result<Out>,
    },
}

impl Sink<fs::File> {
    /// Creates a [`Sink::File`] creating (or truncating) a [`fs::File`] at
    /// the given `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            open: |path| fs::File::create(path),
        }
    }

    /// Creates a [`Sink::File`] at the given `path`, if any, or a
    /// [`Sink::Null`] otherwise.
    #[must_use]
    pub fn from_path(path: Option<impl Into<PathBuf>>) -> Self {
        path.map_or(Self::Null, Self::file)
    }
}

impl<Out> Sink<Out> {
    /// Indicates whether this is a [`Sink::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Opens this [`Sink`], resolving a directory path into a file named
    /// after the given `now` time.
    ///
    /// # Errors
    ///
    /// [`WriterError::SinkOpen`] if the output cannot be opened.
    pub fn open(self, now: SystemTime) -> WriterResult<Option<Out>> {
        match self {
            Self::Null => Ok(None),
            Self::Output(out) => Ok(Some(out)),
            Self::File { path, open } => {
                let path = resolve_path(path, now);
                open(&path)
                    .map(Some)
                    .map_err(|e| WriterError::sink_open(path, e))
            }
        }
    }
}

impl<Out> fmt::Debug for Sink<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Output(_) => f.write_str("Output(..)"),
            Self::File { path, .. } => f
                .debug_struct("File")
                .field("path", path)
                .finish_non_exhaustive(),
        }
    }
}

/// Resolves a directory `path` into a report file inside it, named after the
/// given `now` time in milliseconds since the Unix epoch.
fn resolve_path(path: PathBuf, now: SystemTime) -> PathBuf {
    if path.is_dir() {
        let millis = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        path.join(format!("{millis}.xml"))
    } else {
        path
    }
}
