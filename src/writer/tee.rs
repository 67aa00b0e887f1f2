// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Passing events to multiple terminating [`Writer`]s simultaneously.

use std::cmp;

use crate::{event::Run, Event, Stats, Writer};

/// Wrapper for passing events to multiple terminating [`Writer`]s
/// simultaneously.
///
/// The `left` [`Writer`] always sees an event before the `right` one.
#[derive(Clone, Debug)]
pub struct Tee<L, R> {
    /// Left [`Writer`].
    left: L,

    /// Right [`Writer`].
    right: R,
}

impl<L, R> Tee<L, R> {
    /// Creates a new [`Tee`] [`Writer`], which passes events both to the `left`
    /// and `right` [`Writer`]s.
    #[must_use]
    pub const fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Returns the left [`Writer`].
    #[must_use]
    pub const fn left(&self) -> &L {
        &self.left
    }

    /// Returns the right [`Writer`].
    #[must_use]
    pub const fn right(&self) -> &R {
        &self.right
    }

    /// Splits this [`Tee`] back into its `left` and `right` [`Writer`]s.
    #[must_use]
    pub fn into_inner(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L: Writer, R: Writer> Writer for Tee<L, R> {
    fn handle_event(&mut self, event: Event<Run>) {
        self.left.handle_event(event.clone());
        self.right.handle_event(event);
    }
}

impl<L: Stats, R: Stats> Stats for Tee<L, R> {
    fn passed_tests(&self) -> usize {
        cmp::max(self.left.passed_tests(), self.right.passed_tests())
    }

    fn failed_tests(&self) -> usize {
        cmp::max(self.left.failed_tests(), self.right.failed_tests())
    }

    fn skipped_tests(&self) -> usize {
        cmp::max(self.left.skipped_tests(), self.right.skipped_tests())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use crate::event::{self, Metadata};

    use super::*;

    #[derive(Debug, Default)]
    struct Passes(usize);

    impl Writer for Passes {
        fn test_passed(&mut self, _: &event::Test, _: Metadata) {
            self.0 += 1;
        }
    }

    impl Stats for Passes {
        fn passed_tests(&self) -> usize {
            self.0
        }

        fn failed_tests(&self) -> usize {
            0
        }

        fn skipped_tests(&self) -> usize {
            0
        }
    }

    #[test]
    fn forwards_to_both_sides() {
        let mut tee = Tee::new(Passes::default(), Passes(3));

        tee.handle_event(Event::with_time(
            Run::passed("Math", "adds", Duration::ZERO),
            SystemTime::UNIX_EPOCH,
        ));

        assert_eq!(tee.left().0, 1);
        assert_eq!(tee.right().0, 4);
        assert_eq!(tee.passed_tests(), 4);

        let (left, right) = tee.into_inner();
        assert_eq!((left.0, right.0), (1, 4));
    }
}
