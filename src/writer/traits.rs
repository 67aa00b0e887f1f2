// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core traits for test run event writers.

use crate::{
    event::{self, Metadata, Outcome, Run},
    Event,
};

/// Writer of [`Run`] events to some output.
///
/// Events are expected to arrive strictly sequentially, each one being
/// handled to completion before the next one.
///
/// Every lifecycle hook is a no-op by default, so implementors override only
/// the ones they care about. Wrapping writers (like [`Tee`]) override
/// [`Writer::handle_event()`] itself instead.
///
/// [`Tee`]: super::Tee
pub trait Writer {
    /// Handles the given [`Run`] event, dispatching it to the matching
    /// lifecycle hook.
    fn handle_event(&mut self, event: Event<Run>) {
        let (value, meta) = event.split();
        match value {
            Run::Started => self.run_started(meta),
            Run::Suite(suite) => self.suite_started(&suite, meta),
            Run::Test(test) => match &test.outcome {
                Outcome::Passed => self.test_passed(&test, meta),
                Outcome::Failed(failure) => {
                    self.test_failed(&test, failure, meta);
                }
                Outcome::Pending => self.test_pending(&test, meta),
            },
            Run::Finished => self.run_finished(meta),
        }
    }

    /// Handles [`Run::Started`].
    fn run_started(&mut self, _meta: Metadata) {}

    /// Handles [`Run::Suite`].
    fn suite_started(&mut self, _suite: &event::Suite, _meta: Metadata) {}

    /// Handles a [`Passed`] [`event::Test`].
    ///
    /// [`Passed`]: Outcome::Passed
    fn test_passed(&mut self, _test: &event::Test, _meta: Metadata) {}

    /// Handles a [`Failed`] [`event::Test`].
    ///
    /// [`Failed`]: Outcome::Failed
    fn test_failed(
        &mut self,
        _test: &event::Test,
        _failure: &event::Failure,
        _meta: Metadata,
    ) {
    }

    /// Handles a [`Pending`] [`event::Test`].
    ///
    /// [`Pending`]: Outcome::Pending
    fn test_pending(&mut self, _test: &event::Test, _meta: Metadata) {}

    /// Handles [`Run::Finished`].
    fn run_finished(&mut self, _meta: Metadata) {}
}

/// [`Writer`] tracking a number of passed, failed and skipped tests.
pub trait Stats: Writer {
    /// Returns number of passed tests.
    #[must_use]
    fn passed_tests(&self) -> usize;

    /// Returns number of failed tests.
    #[must_use]
    fn failed_tests(&self) -> usize;

    /// Returns number of skipped (pending) tests.
    #[must_use]
    fn skipped_tests(&self) -> usize;

    /// Indicates whether there were failures during execution.
    #[must_use]
    fn execution_has_failed(&self) -> bool {
        self.failed_tests() > 0
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn handle_event(&mut self, event: Event<Run>) {
        (**self).handle_event(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Writer for Recorder {
        fn run_started(&mut self, _: Metadata) {
            self.calls.push("started".into());
        }

        fn test_failed(
            &mut self,
            test: &event::Test,
            failure: &event::Failure,
            _: Metadata,
        ) {
            self.calls.push(format!(
                "failed {} {}",
                test.title,
                failure.message.as_deref().unwrap_or_default(),
            ));
        }

        fn run_finished(&mut self, _: Metadata) {
            self.calls.push("finished".into());
        }
    }

    #[derive(Debug, Default)]
    struct Counter {
        failed: usize,
    }

    impl Writer for Counter {}

    impl Stats for Counter {
        fn passed_tests(&self) -> usize {
            0
        }

        fn failed_tests(&self) -> usize {
            self.failed
        }

        fn skipped_tests(&self) -> usize {
            0
        }
    }

    fn at(ev: Run) -> Event<Run> {
        Event::with_time(ev, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn dispatches_to_overridden_hooks_only() {
        let mut rec = Recorder::default();

        rec.handle_event(at(Run::Started));
        rec.handle_event(at(Run::suite("Math")));
        rec.handle_event(at(Run::passed("Math", "adds", Duration::ZERO)));
        rec.handle_event(at(Run::failed(
            "Math",
            "subtracts",
            Duration::ZERO,
            "1-1≠0",
            "stack...",
        )));
        rec.handle_event(at(Run::pending("Math", "divides")));
        rec.handle_event(at(Run::Finished));

        assert_eq!(
            rec.calls,
            ["started", "failed subtracts 1-1≠0", "finished"],
        );
    }

    #[test]
    fn forwards_through_mutable_reference() {
        fn feed(mut writer: impl Writer, ev: Event<Run>) {
            writer.handle_event(ev);
        }

        let mut rec = Recorder::default();
        feed(&mut rec, at(Run::Started));

        assert_eq!(rec.calls, ["started"]);
    }

    #[test]
    fn execution_has_failed_on_failures() {
        let mut counter = Counter::default();
        assert!(!counter.execution_has_failed());

        counter.failed = 1;
        assert!(counter.execution_has_failed());
    }
}
