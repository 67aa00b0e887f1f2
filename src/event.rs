// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in a lifecycle of a test run.
//!
//! The top-level enum here is [`Run`]. Each event is wrapped into an
//! [`Event`], carrying the [`SystemTime`] it has happened at, so the
//! [`Writer`]s are able to measure suites without consulting a clock on
//! their own.
//!
//! [`Writer`]: crate::Writer

use std::time::{Duration, SystemTime};

use derive_more::with_trait::{AsRef, Deref, DerefMut};
use itertools::Itertools as _;

/// Arbitrary event, paired with the time it has happened at.
#[derive(AsRef, Clone, Copy, Debug, Deref, DerefMut)]
pub struct Event<T: ?Sized> {
    /// [`SystemTime`] when this [`Event`] has happened.
    pub at: SystemTime,

    /// Actual value of this [`Event`].
    #[as_ref]
    #[deref]
    #[deref_mut]
    pub value: T,
}

impl<T> Event<T> {
    /// Creates a new [`Event`] out of the given `value`, happened right now.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_time(value, SystemTime::now())
    }

    /// Creates a new [`Event`] out of the given `value`, happened `at` the
    /// given time.
    #[must_use]
    pub const fn with_time(value: T, at: SystemTime) -> Self {
        Self { at, value }
    }

    /// Unwraps the inner [`Event::value`] loosing all the attached metadata.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Splits this [`Event`] to the inner [`Event::value`] and its detached
    /// metadata.
    #[must_use]
    pub fn split(self) -> (T, Metadata) {
        let Self { at, value } = self;
        (value, Event { at, value: () })
    }

    /// Maps the inner [`Event::value`] with the given function.
    #[must_use]
    pub fn map<V>(self, f: impl FnOnce(T) -> V) -> Event<V> {
        let (val, meta) = self.split();
        meta.wrap(f(val))
    }
}

/// Shortcut for a detached metadata of an arbitrary [`Event`].
pub type Metadata = Event<()>;

impl Metadata {
    /// Wraps the given `value` with this [`Event`] metadata.
    #[must_use]
    pub const fn wrap<V>(self, value: V) -> Event<V> {
        Event { at: self.at, value }
    }
}

/// Lifecycle event of a test run, as delivered by a test runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Deserialize),
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum Run {
    /// Test run has started.
    Started,

    /// Runner has explicitly entered a [`Suite`].
    Suite(Suite),

    /// [`Test`] has completed with some [`Outcome`].
    Test(Test),

    /// Test run has finished. No more events are expected.
    Finished,
}

impl Run {
    /// Creates a [`Run::Suite`] event for the given fully qualified `title`.
    #[must_use]
    pub fn suite(title: impl Into<String>) -> Self {
        Self::Suite(Suite { title: title.into() })
    }

    /// Creates a [`Run::Test`] event of a [`Passed`] test.
    ///
    /// [`Passed`]: Outcome::Passed
    #[must_use]
    pub fn passed(
        suite: impl Into<String>,
        title: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self::Test(Test::new(suite, title, Some(duration), Outcome::Passed))
    }

    /// Creates a [`Run::Test`] event of a [`Failed`] test.
    ///
    /// [`Failed`]: Outcome::Failed
    #[must_use]
    pub fn failed(
        suite: impl Into<String>,
        title: impl Into<String>,
        duration: Duration,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        let failure = Failure {
            message: Some(message.into()),
            stack: Some(stack.into()),
        };
        Self::Test(Test::new(
            suite,
            title,
            Some(duration),
            Outcome::Failed(failure),
        ))
    }

    /// Creates a [`Run::Test`] event of a [`Pending`] test.
    ///
    /// [`Pending`]: Outcome::Pending
    #[must_use]
    pub fn pending(suite: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Test(Test::new(suite, title, None, Outcome::Pending))
    }
}

/// Named group of tests.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
pub struct Suite {
    /// Fully qualified title of this [`Suite`] (see [`full_title()`]).
    pub title: String,
}

/// Single completed test.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
pub struct Test {
    /// Fully qualified title of the [`Suite`] owning this [`Test`].
    pub suite: String,

    /// Own title of this [`Test`].
    pub title: String,

    /// Time this [`Test`] took to run, if known.
    #[cfg_attr(
        feature = "json",
        serde(
            default,
            rename = "duration_ms",
            deserialize_with = "millis::deserialize"
        )
    )]
    pub duration: Option<Duration>,

    /// [`Outcome`] of this [`Test`].
    pub outcome: Outcome,
}

impl Test {
    /// Creates a new [`Test`].
    #[must_use]
    pub fn new(
        suite: impl Into<String>,
        title: impl Into<String>,
        duration: Option<Duration>,
        outcome: Outcome,
    ) -> Self {
        Self {
            suite: suite.into(),
            title: title.into(),
            duration,
            outcome,
        }
    }
}

/// Terminal state of a single [`Test`] execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Deserialize),
    serde(tag = "state", rename_all = "snake_case")
)]
pub enum Outcome {
    /// [`Test`] has passed.
    Passed,

    /// [`Test`] has failed.
    Failed(Failure),

    /// [`Test`] was skipped.
    Pending,
}

/// Error a [`Test`] has [`Failed`] with.
///
/// Both fields are optional, as runners don't always provide them.
///
/// [`Failed`]: Outcome::Failed
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
pub struct Failure {
    /// Short description of the failure.
    #[cfg_attr(feature = "json", serde(default))]
    pub message: Option<String>,

    /// Stack trace (or any other detailed text) of the failure.
    #[cfg_attr(feature = "json", serde(default))]
    pub stack: Option<String>,
}

/// Joins the given chain of ancestor titles (outermost first) into a single
/// fully qualified title.
///
/// Empty segments (like the one of an anonymous root suite) are omitted.
#[must_use]
pub fn full_title<I>(chain: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    chain
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_owned())
        .join(" ")
}

#[cfg(feature = "json")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer};

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<Duration>, D::Error> {
        let ms = Option::<f64>::deserialize(de)?;
        Ok(ms
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .map(|ms| Duration::from_secs_f64(ms / 1000.0)))
    }
}
