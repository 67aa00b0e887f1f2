//! Streaming of a JUnit XML document into an output.

use std::io;

use crate::{
    error::{WriterError, WriterResult},
    escape,
};

use super::{
    suite::{seconds, Status, SuiteReport, TestCase},
    tag::{closing, Tag},
};

/// Writer of a `<testsuites>` document, streaming each finished
/// [`SuiteReport`] as soon as it's flushed.
///
/// Without an output it still accepts everything, but writes nothing.
#[derive(Debug)]
pub struct ReportWriter<Out: io::Write> {
    /// [`io::Write`] implementor to output XML into.
    output: Option<Out>,
}

impl<Out: io::Write> ReportWriter<Out> {
    /// Opens a document titled `name`, writing its `<testsuites>` opening
    /// tag into the given `output`.
    ///
    /// # Errors
    ///
    /// If the opening tag cannot be written. The `output` is released then.
    pub fn open(output: Option<Out>, name: &str) -> WriterResult<Self> {
        let mut writer = Self { output };
        let mut header =
            Tag::new("testsuites").attr("name", name).opening().build();
        header.push('\n');
        writer.write(&header)?;
        Ok(writer)
    }

    /// Creates a [`ReportWriter`] writing nothing.
    #[must_use]
    pub const fn null() -> Self {
        Self { output: None }
    }

    /// Indicates whether this [`ReportWriter`] writes nothing.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.output.is_none()
    }

    /// Writes the given [`SuiteReport`] as a `<testsuite>` block.
    ///
    /// Empty suites are written too.
    ///
    /// # Errors
    ///
    /// [`WriterError::Serialization`] if the block cannot be written. It may
    /// be written partially then, but the document stays open for the
    /// following suites.
    pub fn flush_suite(&mut self, suite: &SuiteReport) -> WriterResult<()> {
        if self.is_null() {
            return Ok(());
        }
        let block = render_suite(suite);
        self.write(&block).map_err(|e| match e {
            WriterError::Io(e) => WriterError::serialization(suite.title(), e),
            e => e,
        })
    }

    /// Closes the document with the `</testsuites>` tag, and releases the
    /// output.
    ///
    /// # Errors
    ///
    /// If the closing tag cannot be written or flushed. The output is
    /// released anyway.
    pub fn close(mut self) -> WriterResult<()> {
        self.write(&closing("testsuites"))?;
        if let Some(out) = self.output.as_mut() {
            out.flush()?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> WriterResult<()> {
        if let Some(out) = self.output.as_mut() {
            out.write_all(text.as_bytes())?;
        }
        Ok(())
    }
}

/// Renders a `<testsuite>` block of the given [`SuiteReport`] along with all
/// its `<testcase>`s.
#[must_use]
pub fn render_suite(suite: &SuiteReport) -> String {
    let mut out = Tag::new("testsuite")
        .attr("name", suite.title())
        .attr("tests", suite.tests().len())
        .attr("failures", suite.failures())
        .attr("skipped", suite.skipped())
        .attr(
            "timestamp",
            humantime::format_rfc3339_seconds(suite.started_at()),
        )
        .attr("time", seconds(suite.duration()))
        .opening()
        .build();
    out.push('\n');
    for case in suite.tests() {
        out.push_str(&render_case(case));
    }
    out.push_str(&closing("testsuite"));
    out
}

/// Renders a `<testcase>` of the given [`TestCase`].
///
/// A failed one carries a `message` attribute and a nested `<failure>` with
/// the failure detail as CDATA. A skipped one carries a nested `<skipped/>`.
#[must_use]
pub fn render_case(case: &TestCase) -> String {
    let mut tag = Tag::new("testcase")
        .attr("classname", &case.classname)
        .attr("name", &case.name)
        .attr("time", seconds(case.time));
    let inner = match &case.status {
        Status::Passed => return tag.build(),
        Status::Skipped => Tag::new("skipped").build_empty(),
        Status::Failed { message, detail } => {
            tag = tag.attr("message", message);
            let failure = Tag::new("failure").attrs(tag.attributes().clone());
            if detail.is_empty() {
                failure.build()
            } else {
                failure.raw_content(escape::cdata(detail)).build()
            }
        }
    };
    tag.raw_content(inner).build()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use crate::{event::Run, test_utils::Probe};

    use super::*;

    fn epoch(millis: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(millis)
    }

    fn case(run: Run) -> TestCase {
        let Run::Test(test) = run else {
            panic!("expected `Run::Test`");
        };
        TestCase::from_event(&test, true)
    }

    fn math_suite() -> SuiteReport {
        let mut suite = SuiteReport::new("Math", epoch(1_700_000_000_000));
        suite.record(case(Run::passed(
            "Math",
            "adds",
            Duration::from_millis(1),
        )));
        suite.record(case(Run::failed(
            "Math",
            "subtracts",
            Duration::from_millis(2),
            "1-1≠0",
            "stack...",
        )));
        _ = suite.seal(epoch(1_700_000_000_003));
        suite
    }

    #[test]
    fn renders_passed_case() {
        let rendered = render_case(&case(Run::passed(
            "Math",
            "adds",
            Duration::from_millis(1),
        )));

        assert_eq!(
            rendered,
            "<testcase classname=\"Math\" name=\"adds\" time=\"0.001\">\
             </testcase>\n",
        );
    }

    #[test]
    fn renders_failed_case() {
        let rendered = render_case(&case(Run::failed(
            "Math",
            "subtracts",
            Duration::ZERO,
            "expected 1 got 2",
            "at line 5",
        )));

        assert_eq!(
            rendered,
            "<testcase classname=\"Math\" name=\"subtracts\" time=\"0\" \
             message=\"expected 1 got 2\">\
             <failure classname=\"Math\" name=\"subtracts\" time=\"0\" \
             message=\"expected 1 got 2\"><![CDATA[at line 5]]></failure>\n\
             </testcase>\n",
        );
    }

    #[test]
    fn renders_failed_case_without_detail() {
        let rendered = render_case(&TestCase {
            classname: "Math".into(),
            name: "t".into(),
            time: Duration::ZERO,
            status: Status::Failed {
                message: "<oops>".into(),
                detail: String::new(),
            },
        });

        assert!(rendered.contains("message=\"\\x3Coops\\x3E\""));
        assert!(rendered.contains("\\x3E\"></failure>\n</testcase>"));
        assert!(!rendered.contains("CDATA"));
    }

    #[test]
    fn renders_skipped_case() {
        let rendered = render_case(&case(Run::pending("Math", "divides")));

        assert_eq!(
            rendered,
            "<testcase classname=\"Math\" name=\"divides\" time=\"0\">\
             <skipped/>\n</testcase>\n",
        );
    }

    #[test]
    fn renders_suite_block() {
        let rendered = render_suite(&math_suite());

        assert!(rendered.starts_with(
            "<testsuite name=\"Math\" tests=\"2\" failures=\"1\" \
             skipped=\"0\" timestamp=\"2023-11-14T22:13:20Z\" \
             time=\"0.003\">\n<testcase classname=\"Math\" name=\"adds\"",
        ));
        assert!(rendered.ends_with("</testcase>\n</testsuite>\n"));
        assert_eq!(rendered.matches("<testcase ").count(), 2);
    }

    #[test]
    fn renders_empty_suite() {
        let suite = SuiteReport::new("Empty", epoch(1_700_000_000_000));

        assert_eq!(
            render_suite(&suite),
            "<testsuite name=\"Empty\" tests=\"0\" failures=\"0\" \
             skipped=\"0\" timestamp=\"2023-11-14T22:13:20Z\" \
             time=\"0\">\n</testsuite>\n",
        );
    }

    #[test]
    fn streams_whole_document() {
        let probe = Probe::new();
        let mut report =
            ReportWriter::open(Some(probe.output()), "CI").unwrap();
        assert_eq!(probe.contents(), "<testsuites name=\"CI\">\n");

        report.flush_suite(&math_suite()).unwrap();
        assert!(probe.contents().ends_with("</testsuite>\n"));

        report.close().unwrap();
        let contents = probe.contents();
        assert!(
            contents.starts_with("<testsuites name=\"CI\">\n<testsuite "),
        );
        assert!(contents.ends_with("</testsuite>\n</testsuites>\n"));
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn null_writes_nothing() {
        let mut report = ReportWriter::<Vec<u8>>::open(None, "CI").unwrap();
        assert!(report.is_null());

        report.flush_suite(&math_suite()).unwrap();
        report.close().unwrap();
        assert!(ReportWriter::<Vec<u8>>::null().is_null());
    }

    #[test]
    fn failed_suite_keeps_document_open() {
        let probe = Probe::new();
        let mut report =
            ReportWriter::open(Some(probe.failing_on("Math")), "CI").unwrap();

        let err = report.flush_suite(&math_suite()).unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("`Math`"));

        let other = SuiteReport::new("Other", epoch(0));
        report.flush_suite(&other).unwrap();
        report.close().unwrap();

        let contents = probe.contents();
        assert!(!contents.contains("Math"));
        assert!(contents.contains("<testsuite name=\"Other\""));
        assert!(contents.ends_with("</testsuites>\n"));
        assert_eq!(probe.releases(), 1);
    }

    #[test]
    fn failed_open_releases_output() {
        let probe = Probe::new();

        let err = ReportWriter::open(Some(probe.failing_on("testsuites")), "CI")
            .unwrap_err();

        assert!(matches!(err, WriterError::Io(_)));
        assert_eq!(probe.releases(), 1);
        assert_eq!(probe.contents(), "");
    }
}
