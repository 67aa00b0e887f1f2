// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for composing CLI options.
//!
//! The main thing in this module is [`Opts`], which composes the strongly
//! typed CLI options of every [`Writer`] into a single CLI.
//!
//! [`Writer`]: crate::Writer

use std::path::PathBuf;

use crate::writer::{basic, junit};

pub use clap::{Args, Parser};

/// Root CLI (command line interface) of the `junit-stream` binary.
///
/// Reads newline-delimited JSON events from a file or the standard input,
/// printing a progress log and writing a JUnit XML report.
#[derive(Clone, Debug, clap::Parser)]
#[command(
    name = "junit-stream",
    about = "Streams test run events into a JUnit XML report",
    long_about = None,
)]
pub struct Opts {
    /// File to read newline-delimited JSON events from.
    ///
    /// Standard input is read if omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// [`Basic`] writer CLI options.
    ///
    /// [`Basic`]: crate::writer::Basic
    #[command(flatten)]
    pub basic: basic::Cli,

    /// [`JUnit`] writer CLI options.
    ///
    /// [`JUnit`]: crate::writer::JUnit
    #[command(flatten)]
    pub junit: junit::Cli,
}

impl Opts {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as clap::Parser>::parse()
    }
}
