// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Writer`] implementation: human-readable progress log.

pub mod cli;

use std::{
    io,
    time::{Duration, SystemTime},
};

use derive_more::with_trait::{Deref, DerefMut};
use itertools::Itertools as _;

use crate::{
    event::{self, Metadata},
    writer::{
        junit::suite::seconds,
        out::{Styles, WriteStrExt as _},
        Stats, Writer,
    },
};

#[doc(inline)]
pub use self::cli::{Cli, Coloring};

/// Suite currently being logged.
#[derive(Clone, Debug)]
struct ActiveSuite {
    title: String,
    started_at: SystemTime,
    tests: usize,
}

/// Failed test remembered for the closing summary.
#[derive(Clone, Debug)]
struct FailedTest {
    suite: String,
    title: String,
    message: String,
    stack: String,
}

/// Default [`Writer`] implementation outputting to an [`io::Write`]
/// implementor ([`io::Stdout`] by default).
///
/// Pretty-prints with colors if terminal was successfully detected, otherwise
/// has simple output. Failures to write are logged and never interrupt the
/// run.
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Basic<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    #[deref]
    #[deref_mut]
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,

    /// [`SystemTime`] the run has started at.
    started_at: Option<SystemTime>,

    /// Currently logged suite.
    suite: Option<ActiveSuite>,

    /// Failed tests in their numbering order.
    failures: Vec<FailedTest>,

    passed: usize,
    skipped: usize,
}

impl Basic {
    /// Creates a new [`Basic`] [`Writer`] outputting to [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Coloring::Auto)
    }
}

impl<Out: io::Write> Basic<Out> {
    /// Creates a new [`Basic`] [`Writer`] outputting to the given `output`.
    #[must_use]
    pub fn new(output: Out, color: Coloring) -> Self {
        let mut basic = Self {
            output,
            styles: Styles::new(),
            started_at: None,
            suite: None,
            failures: Vec::new(),
            passed: 0,
            skipped: 0,
        };
        basic.apply_cli(Cli { color });
        basic
    }

    /// Applies the given [`Cli`] options to this [`Basic`] [`Writer`].
    pub fn apply_cli(&mut self, cli: Cli) {
        self.styles.apply_coloring(cli.color);
    }

    /// Unwraps the underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    /// Outputs the footer of the active suite (if any).
    fn close_suite(&mut self, now: SystemTime) -> io::Result<()> {
        let Some(suite) = self.suite.take() else {
            return Ok(());
        };
        let duration = now.duration_since(suite.started_at).unwrap_or_default();
        self.output.write_line("")?;
        self.output.write_line(self.styles.dim(format!(
            "  Suite duration: {} s, Tests: {}",
            seconds(duration),
            suite.tests,
        )))
    }

    /// Outputs the header of a suite titled `title`, closing the active one.
    fn open_suite(&mut self, title: &str, now: SystemTime) -> io::Result<()> {
        self.close_suite(now)?;
        self.suite = Some(ActiveSuite {
            title: title.to_owned(),
            started_at: now,
            tests: 0,
        });
        self.output.write_line("")?;
        self.output
            .write_line(format!("  {}", self.styles.header(title)))
    }

    /// Switches to the suite of the given `test`, if it's not the active one.
    fn enter_suite_of(
        &mut self,
        test: &event::Test,
        now: SystemTime,
    ) -> io::Result<()> {
        if self.suite.as_ref().map(|s| s.title.as_str())
            != Some(test.suite.as_str())
        {
            self.open_suite(&test.suite, now)?;
        }
        if let Some(suite) = self.suite.as_mut() {
            suite.tests += 1;
        }
        Ok(())
    }

    fn passed(
        &mut self,
        test: &event::Test,
        now: SystemTime,
    ) -> io::Result<()> {
        self.passed += 1;
        self.enter_suite_of(test, now)?;
        let millis = test.duration.unwrap_or_default().as_millis();
        self.output.write_line(format!(
            "    {} {}",
            self.styles.ok(format!("✓ {}:", test.title)),
            self.styles.dim(format!("{millis}ms")),
        ))
    }

    fn failed(
        &mut self,
        test: &event::Test,
        failure: &event::Failure,
        now: SystemTime,
    ) -> io::Result<()> {
        self.enter_suite_of(test, now)?;
        self.failures.push(FailedTest {
            suite: test.suite.clone(),
            title: test.title.clone(),
            message: failure.message.clone().unwrap_or_default(),
            stack: failure.stack.clone().unwrap_or_default(),
        });
        self.output.write_line(self.styles.err(format!(
            "    {}) {}",
            self.failures.len(),
            test.title,
        )))
    }

    fn pending(
        &mut self,
        test: &event::Test,
        now: SystemTime,
    ) -> io::Result<()> {
        self.skipped += 1;
        self.enter_suite_of(test, now)?;
        self.output
            .write_line(self.styles.skipped(format!("    - {}", test.title)))
    }

    /// Outputs the closing summary of the whole run.
    fn epilogue(&mut self, now: SystemTime) -> io::Result<()> {
        self.close_suite(now)?;

        let elapsed = self
            .started_at
            .and_then(|start| now.duration_since(start).ok())
            .unwrap_or_default();
        let elapsed = Duration::from_millis(
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        );

        self.output.write_line("")?;
        self.output.write_line(format!(
            "  {} {}",
            self.styles.ok(format!("{} passing", self.passed)),
            self.styles
                .dim(format!("({})", humantime::format_duration(elapsed))),
        ))?;
        if !self.failures.is_empty() {
            self.output.write_line(
                self.styles
                    .err(format!("  {} failing", self.failures.len())),
            )?;
        }
        if self.skipped > 0 {
            self.output.write_line(
                self.styles.skipped(format!("  {} pending", self.skipped)),
            )?;
        }

        for (n, failure) in (1..).zip(&self.failures) {
            let title = event::full_title([&failure.suite, &failure.title]);
            let stack = failure
                .stack
                .lines()
                .map(|line| format!("     {line}"))
                .join("\n");
            self.output.write_line("")?;
            self.output.write_line(format!("  {n}) {title}:"))?;
            self.output.write_line(
                self.styles.err(format!("     {}", failure.message)),
            )?;
            if !stack.is_empty() {
                self.output.write_line(self.styles.dim(stack))?;
            }
        }
        self.output.write_line("")?;
        self.output.flush()
    }

    fn log(result: io::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("failed to write progress log: {e}");
        }
    }
}

impl<Out: io::Write> Writer for Basic<Out> {
    fn run_started(&mut self, meta: Metadata) {
        if self.started_at.is_none() {
            self.started_at = Some(meta.at);
        }
    }

    fn suite_started(&mut self, suite: &event::Suite, meta: Metadata) {
        if !suite.title.is_empty() {
            Self::log(self.open_suite(&suite.title, meta.at));
        }
    }

    fn test_passed(&mut self, test: &event::Test, meta: Metadata) {
        Self::log(self.passed(test, meta.at));
    }

    fn test_failed(
        &mut self,
        test: &event::Test,
        failure: &event::Failure,
        meta: Metadata,
    ) {
        Self::log(self.failed(test, failure, meta.at));
    }

    fn test_pending(&mut self, test: &event::Test, meta: Metadata) {
        Self::log(self.pending(test, meta.at));
    }

    fn run_finished(&mut self, meta: Metadata) {
        Self::log(self.epilogue(meta.at));
    }
}

impl<Out: io::Write> Stats for Basic<Out> {
    fn passed_tests(&self) -> usize {
        self.passed
    }

    fn failed_tests(&self) -> usize {
        self.failures.len()
    }

    fn skipped_tests(&self) -> usize {
        self.skipped
    }
}
