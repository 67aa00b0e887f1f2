// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding of [`Run`] events from newline-delimited JSON.
//!
//! Each non-blank line holds a single event object, tagged by its `event`
//! field:
//! ```json
//! {"event": "started"}
//! {"event": "suite", "title": "Math"}
//! {"event": "test", "suite": "Math", "title": "adds", "duration_ms": 1, "outcome": {"state": "passed"}}
//! {"event": "test", "suite": "Math", "title": "subtracts", "outcome": {"state": "failed", "message": "boom", "stack": "at line 5"}}
//! {"event": "finished"}
//! ```

use std::io::{self, BufRead};

use derive_more::with_trait::{Display, Error, From};

use crate::event::Run;

/// Error of decoding a single line of events.
#[derive(Debug, Display, Error, From)]
pub enum DecodeError {
    /// Line cannot be read.
    #[display("failed to read events: {_0}")]
    Io(io::Error),

    /// Line doesn't hold a valid event.
    #[display("malformed event at line {line}: {source}")]
    #[from(ignore)]
    Json {
        /// 1-based number of the malformed line.
        #[error(not(source))]
        line: usize,

        /// Underlying decoding error.
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Indicates whether the following lines may still be read after this
    /// [`DecodeError`].
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Json { .. })
    }
}

/// Iterator over [`Run`] events decoded from newline-delimited JSON.
#[derive(Debug)]
pub struct Events<R> {
    reader: R,
    line: usize,
    buf: String,
}

/// Creates an iterator decoding [`Run`] events from the given `reader` line
/// by line. Blank lines are skipped.
#[must_use]
pub fn read_events<R: BufRead>(reader: R) -> Events<R> {
    Events {
        reader,
        line: 0,
        buf: String::new(),
    }
}

impl<R: BufRead> Iterator for Events<R> {
    type Item = Result<Run, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }
            if self.buf.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&self.buf).map_err(|source| {
                DecodeError::Json {
                    line: self.line,
                    source,
                }
            }));
        }
    }
}
