//! Main JUnit XML writer implementation.

use std::{fs, io, time::SystemTime};

use crate::{
    event::{self, Metadata},
    writer::{Stats, Writer},
};

use super::{
    cli::Cli,
    report::ReportWriter,
    sink::Sink,
    suite::{Status, SuiteReport, TestCase},
};

/// [JUnit XML report][1] [`Writer`] implementation streaming XML into an
/// [`io::Write`] implementor.
///
/// # Suite boundaries
///
/// A `<testsuite>` is written as soon as it's known to be finished, which
/// happens when:
/// - a [`Run::Suite`] event explicitly starts another suite;
/// - a test of another suite completes (tests are expected to arrive grouped
///   by their suites, otherwise a suite is split into several `<testsuite>`
///   blocks of the same name);
/// - the run finishes.
///
/// # Errors
///
/// Nothing is propagated: a report which cannot be opened is disabled for the
/// whole run, and a `<testsuite>` which cannot be written is skipped. Both
/// are logged as warnings. Tests are still accounted in any case.
///
/// [`Run::Suite`]: event::Run::Suite
/// [1]: https://llg.cubic.org/docs/junit
#[derive(Debug)]
pub struct JUnit<Out: io::Write> {
    /// Destination of the report, until it is opened.
    sink: Option<Sink<Out>>,

    /// `name` of the `<testsuites>` element.
    name: String,

    /// Whether failures carry their stack traces.
    stack_traces: bool,

    /// Opened report, until the run finishes.
    report: Option<ReportWriter<Out>>,

    /// Currently active suite.
    suite: Option<SuiteReport>,

    /// Number of suites already flushed.
    flushed_suites: usize,

    /// Totals of all the recorded tests.
    passed: usize,
    failed: usize,
    skipped: usize,

    /// Indicates whether the run has finished.
    finished: bool,
}

impl JUnit<fs::File> {
    /// Creates a new [`JUnit`] [`Writer`] according to the given [`Cli`]
    /// options, writing the report into [`Cli::path`], if any.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::with_sink(Sink::from_path(cli.path.clone()), cli)
    }
}

impl<Out: io::Write> JUnit<Out> {
    /// Creates a new [`JUnit`] [`Writer`] outputting XML report into the
    /// given `output`.
    ///
    /// [`Cli::path`] is ignored.
    #[must_use]
    pub fn new(output: Out, cli: &Cli) -> Self {
        Self::with_sink(Sink::Output(output), cli)
    }

    /// Creates a new [`JUnit`] [`Writer`] accumulating tests without writing
    /// anything.
    #[must_use]
    pub fn null(cli: &Cli) -> Self {
        Self::with_sink(Sink::Null, cli)
    }

    /// Creates a new [`JUnit`] [`Writer`] outputting XML report into the
    /// given [`Sink`], once the run starts.
    ///
    /// [`Cli::path`] is ignored.
    #[must_use]
    pub fn with_sink(sink: Sink<Out>, cli: &Cli) -> Self {
        Self {
            sink: Some(sink),
            name: cli.name.clone(),
            stack_traces: cli.stack_traces,
            report: None,
            suite: None,
            flushed_suites: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Currently active suite, if any.
    #[must_use]
    pub const fn suite(&self) -> Option<&SuiteReport> {
        self.suite.as_ref()
    }

    /// Number of suites already flushed into the report.
    #[must_use]
    pub const fn flushed_suites(&self) -> usize {
        self.flushed_suites
    }

    /// Indicates whether the run has finished and the report is closed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Seals the active suite (if any) and writes it into the report.
    fn flush_suite(&mut self, now: SystemTime) {
        let Some(mut suite) = self.suite.take() else {
            return;
        };
        _ = suite.seal(now);
        tracing::debug!(
            suite = %suite.title(),
            tests = suite.tests().len(),
            "closing testsuite",
        );
        self.open_report(now);
        if let Some(report) = self.report.as_mut() {
            if let Err(e) = report.flush_suite(&suite) {
                tracing::warn!("skipping JUnit testsuite: {e}");
            }
        }
        self.flushed_suites += 1;
    }

    /// Makes a suite titled `title` the active one, started at `now`.
    fn start_suite(&mut self, title: &str, now: SystemTime) {
        self.flush_suite(now);
        tracing::debug!(suite = %title, "opening testsuite");
        self.suite = Some(SuiteReport::new(title, now));
    }

    /// Records the given completed `test` into its suite, starting a new
    /// suite if the `test` belongs to another one than the active.
    fn record(&mut self, test: &event::Test, meta: Metadata) {
        if self.ignored_after_finish("test") {
            return;
        }
        let active = self.suite.as_ref().map(SuiteReport::title);
        if active != Some(test.suite.as_str()) {
            self.start_suite(&test.suite, meta.at);
        }
        let case = TestCase::from_event(test, self.stack_traces);
        match case.status {
            Status::Passed => self.passed += 1,
            Status::Failed { .. } => self.failed += 1,
            Status::Skipped => self.skipped += 1,
        }
        if let Some(suite) = self.suite.as_mut() {
            suite.record(case);
        }
    }

    /// Opens the report, unless it's opened already.
    ///
    /// Usually happens once the run starts, but a runner may omit reporting
    /// the start, so the first write does it as well.
    fn open_report(&mut self, now: SystemTime) {
        let Some(sink) = self.sink.take() else {
            return;
        };
        let report = sink
            .open(now)
            .and_then(|out| ReportWriter::open(out, &self.name));
        self.report = Some(report.unwrap_or_else(|e| {
            tracing::warn!("JUnit report is disabled: {e}");
            ReportWriter::null()
        }));
    }

    fn ignored_after_finish(&self, what: &str) -> bool {
        if self.finished {
            tracing::warn!("ignoring {what} event received after run finished");
        }
        self.finished
    }
}

impl<Out: io::Write> Writer for JUnit<Out> {
    fn run_started(&mut self, meta: Metadata) {
        if self.ignored_after_finish("start") {
            return;
        }
        if self.sink.is_none() {
            tracing::warn!("ignoring run start, report is opened already");
            return;
        }
        self.open_report(meta.at);
    }

    fn suite_started(&mut self, suite: &event::Suite, meta: Metadata) {
        if self.ignored_after_finish("suite") {
            return;
        }
        if suite.title.is_empty() {
            tracing::debug!("skipping root suite");
            return;
        }
        self.start_suite(&suite.title, meta.at);
    }

    fn test_passed(&mut self, test: &event::Test, meta: Metadata) {
        self.record(test, meta);
    }

    fn test_failed(
        &mut self,
        test: &event::Test,
        _: &event::Failure,
        meta: Metadata,
    ) {
        self.record(test, meta);
    }

    fn test_pending(&mut self, test: &event::Test, meta: Metadata) {
        self.record(test, meta);
    }

    fn run_finished(&mut self, meta: Metadata) {
        if self.ignored_after_finish("finish") {
            return;
        }
        self.flush_suite(meta.at);
        self.open_report(meta.at);
        if let Some(report) = self.report.take() {
            if let Err(e) = report.close() {
                tracing::warn!("failed to close JUnit report: {e}");
            }
        }
        self.finished = true;
    }
}

impl<Out: io::Write> Stats for JUnit<Out> {
    fn passed_tests(&self) -> usize {
        self.passed
    }

    fn failed_tests(&self) -> usize {
        self.failed
    }

    fn skipped_tests(&self) -> usize {
        self.skipped
    }
}
