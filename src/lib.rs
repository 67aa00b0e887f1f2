// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Streaming [JUnit XML][1] reporter for test run lifecycle events.
//!
//! A test runner emits [`event::Run`]s (run started, suite entered, test
//! completed, run finished), and a [`Writer`] consumes them:
//! - [`writer::JUnit`] groups completed tests into suites and streams each
//!   `<testsuite>` into the report as soon as the suite is finished;
//! - [`writer::Basic`] prints a human-readable progress log.
//!
//! ```rust
//! # use std::time::Duration;
//! use junit_stream::{event::Run, writer, Event, Writer as _, WriterExt as _};
//!
//! let mut writer = writer::Basic::new(Vec::new(), writer::Coloring::Never)
//!     .tee(writer::JUnit::new(Vec::new(), &writer::junit::Cli::default()));
//!
//! for ev in [
//!     Run::Started,
//!     Run::passed("Math", "adds", Duration::from_millis(1)),
//!     Run::Finished,
//! ] {
//!     writer.handle_event(Event::new(ev));
//! }
//! ```
//!
//! [1]: https://llg.cubic.org/docs/junit

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod cli;
pub mod error;
pub mod escape;
pub mod event;
#[cfg(feature = "json")]
pub mod json;
pub mod writer;

#[cfg(test)]
mod test_utils;

#[doc(inline)]
pub use self::{
    error::{WriterError, WriterResult},
    event::Event,
    writer::{Ext as WriterExt, Stats, Writer},
};
