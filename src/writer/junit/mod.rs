//! [JUnit XML report][1] [`Writer`] implementation.
//!
//! - [`cli`]: CLI options of the [`JUnit`] writer.
//! - [`sink`]: destination of the report.
//! - [`tag`]: rendering of single XML elements.
//! - [`suite`]: accumulation of a single `<testsuite>`.
//! - [`report`]: streaming of the `<testsuites>` document.
//! - [`writer`]: [`JUnit`] itself, tracking suite boundaries.
//!
//! [`Writer`]: crate::Writer
//! [1]: https://llg.cubic.org/docs/junit

pub mod cli;
pub mod report;
pub mod sink;
pub mod suite;
pub mod tag;
pub mod writer;

#[doc(inline)]
pub use self::{
    cli::Cli,
    report::ReportWriter,
    sink::Sink,
    suite::{Status, SuiteReport, TestCase},
    tag::Tag,
    writer::JUnit,
};
