// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting [`Run`] events.
//!
//! - [`Basic`]: human-readable progress log.
//! - [`JUnit`]: streaming [JUnit XML report][1].
//! - [`Tee`]: both of the above at once.
//!
//! [`Run`]: crate::event::Run
//! [1]: https://llg.cubic.org/docs/junit

pub mod basic;
pub mod junit;
pub mod out;
pub mod tee;
pub mod traits;

#[doc(inline)]
pub use self::{
    basic::{Basic, Coloring},
    junit::JUnit,
    tee::Tee,
    traits::{Stats, Writer},
};

/// Extension of [`Writer`] allowing its composition.
pub trait Ext: Writer + Sized {
    /// Wraps this [`Writer`] into a [`Tee`], passing events both to it and
    /// the `other` [`Writer`].
    #[must_use]
    fn tee<W: Writer>(self, other: W) -> Tee<Self, W> {
        Tee::new(self, other)
    }
}

impl<T: Writer> Ext for T {}
