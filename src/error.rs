// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of report writing.
//!
//! None of these ever escape a [`Writer`]: they're logged and swallowed, so
//! a broken report never breaks the test run itself.
//!
//! [`Writer`]: crate::Writer

use std::{io, path::PathBuf};

use derive_more::with_trait::{Display, Error};

/// Report writing errors.
#[derive(Debug, Display, Error)]
pub enum WriterError {
    /// Output destination cannot be created or opened.
    #[display("failed to open report output `{}`: {source}", path.display())]
    SinkOpen {
        /// Path of the output destination.
        #[error(not(source))]
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// Single `<testsuite>` block cannot be written.
    #[display("failed to write testsuite `{suite}`: {source}")]
    Serialization {
        /// Fully qualified title of the suite.
        #[error(not(source))]
        suite: String,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// I/O error while writing the report envelope.
    #[display("I/O error: {_0}")]
    Io(io::Error),
}

/// Result type alias for report writing operations.
pub type WriterResult<T> = Result<T, WriterError>;

impl WriterError {
    /// Creates a new [`WriterError::SinkOpen`].
    #[must_use]
    pub fn sink_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`WriterError::Serialization`].
    #[must_use]
    pub fn serialization(suite: impl Into<String>, source: io::Error) -> Self {
        Self::Serialization {
            suite: suite.into(),
            source,
        }
    }

    /// Returns true if this is a [`WriterError::SinkOpen`].
    #[must_use]
    pub const fn is_sink_open(&self) -> bool {
        matches!(self, Self::SinkOpen { .. })
    }

    /// Returns true if this is a [`WriterError::Serialization`].
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<io::Error> for WriterError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
