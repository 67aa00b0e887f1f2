//! In-memory aggregate of a single JUnit `testsuite`.

use std::time::{Duration, SystemTime};

use crate::event::{self, Outcome};

/// Status of a [`TestCase`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Test has passed.
    Passed,

    /// Test has failed.
    Failed {
        /// Short description of the failure.
        message: String,

        /// Detailed text of the failure (usually a stack trace). Empty if
        /// omitted.
        detail: String,
    },

    /// Test was skipped.
    Skipped,
}

/// Single completed test of a [`SuiteReport`].
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    /// Fully qualified title of the suite owning this [`TestCase`].
    pub classname: String,

    /// Title of this [`TestCase`].
    pub name: String,

    /// Time this [`TestCase`] took. Zero if unknown.
    pub time: Duration,

    /// [`Status`] of this [`TestCase`].
    pub status: Status,
}

impl TestCase {
    /// Creates a [`TestCase`] out of the given [`event::Test`].
    ///
    /// Missing failure texts are substituted with empty strings, so the report
    /// stays complete. The failure detail is omitted if `with_stack` is
    /// `false`.
    #[must_use]
    pub fn from_event(test: &event::Test, with_stack: bool) -> Self {
        let status = match &test.outcome {
            Outcome::Passed => Status::Passed,
            Outcome::Pending => Status::Skipped,
            Outcome::Failed(failure) => {
                if failure.message.is_none() || failure.stack.is_none() {
                    tracing::warn!(
                        suite = %test.suite,
                        test = %test.title,
                        "failed test has no message or stack, \
                         substituting empty text",
                    );
                }
                Status::Failed {
                    message: failure.message.clone().unwrap_or_default(),
                    detail: with_stack
                        .then(|| failure.stack.clone())
                        .flatten()
                        .unwrap_or_default(),
                }
            }
        };
        Self {
            classname: test.suite.clone(),
            name: test.title.clone(),
            time: test.duration.unwrap_or_default(),
            status,
        }
    }
}

/// Aggregate of one suite's [`TestCase`]s, alive from the suite boundary
/// opening it till the one closing it.
///
/// `passed() + failures() + skipped() == tests().len()` always holds.
#[derive(Clone, Debug)]
pub struct SuiteReport {
    title: String,
    tests: Vec<TestCase>,
    started_at: SystemTime,
    duration: Option<Duration>,
    passed: usize,
    failures: usize,
    skipped: usize,
}

impl SuiteReport {
    /// Creates an empty [`SuiteReport`] started at `now`.
    #[must_use]
    pub fn new(title: impl Into<String>, now: SystemTime) -> Self {
        Self {
            title: title.into(),
            tests: Vec::new(),
            started_at: now,
            duration: None,
            passed: 0,
            failures: 0,
            skipped: 0,
        }
    }

    /// Appends the given [`TestCase`], counting its [`Status`].
    pub fn record(&mut self, case: TestCase) {
        match case.status {
            Status::Passed => self.passed += 1,
            Status::Failed { .. } => self.failures += 1,
            Status::Skipped => self.skipped += 1,
        }
        self.tests.push(case);
    }

    /// Seals this [`SuiteReport`], fixing its duration as the time elapsed
    /// since it has started till `now`.
    ///
    /// Returns `false` if it has been already sealed, leaving the duration
    /// intact.
    pub fn seal(&mut self, now: SystemTime) -> bool {
        if self.duration.is_some() {
            return false;
        }
        self.duration =
            Some(now.duration_since(self.started_at).unwrap_or_default());
        true
    }

    /// Fully qualified title of this suite.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Recorded [`TestCase`]s in their completion order.
    #[must_use]
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// [`SystemTime`] this suite has started at.
    #[must_use]
    pub const fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Duration of this suite. Zero until sealed.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration.unwrap_or_default()
    }

    /// Indicates whether this suite has been sealed.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.duration.is_some()
    }

    /// Number of passed tests.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failed tests.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Number of skipped tests.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Formats the given [`Duration`] as fractional seconds with millisecond
/// precision (`0.001`, `2`, `0`).
#[must_use]
pub fn seconds(duration: Duration) -> String {
    #[expect(clippy::cast_precision_loss, reason = "millis fit into `f64`")]
    let millis = duration.as_millis() as f64;
    format!("{}", millis / 1000.0)
}

#[cfg(test)]
mod tests {
    use crate::event::{Failure, Run};

    use super::*;

    fn test_of(run: Run) -> event::Test {
        match run {
            Run::Test(test) => test,
            _ => panic!("expected `Run::Test`"),
        }
    }

    fn epoch(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn counts_each_status_once() {
        let mut suite = SuiteReport::new("Math", epoch(0));
        let cases = [
            Run::passed("Math", "adds", Duration::from_millis(1)),
            Run::failed("Math", "subtracts", Duration::ZERO, "m", "s"),
            Run::pending("Math", "divides"),
            Run::passed("Math", "multiplies", Duration::ZERO),
        ];
        for (n, run) in cases.into_iter().enumerate() {
            suite.record(TestCase::from_event(&test_of(run), true));

            assert_eq!(
                suite.passed() + suite.failures() + suite.skipped(),
                n + 1,
            );
            assert_eq!(suite.tests().len(), n + 1);
        }

        assert_eq!(suite.passed(), 2);
        assert_eq!(suite.failures(), 1);
        assert_eq!(suite.skipped(), 1);
        assert_eq!(suite.tests()[1].name, "subtracts");
    }

    #[test]
    fn seals_only_once() {
        let mut suite = SuiteReport::new("Math", epoch(10));
        assert!(!suite.is_sealed());
        assert_eq!(suite.duration(), Duration::ZERO);

        assert!(suite.seal(epoch(12)));
        assert!(!suite.seal(epoch(20)));

        assert!(suite.is_sealed());
        assert_eq!(suite.duration(), Duration::from_secs(2));
        assert_eq!(suite.started_at(), epoch(10));
    }

    #[test]
    fn clock_going_backwards_seals_with_zero() {
        let mut suite = SuiteReport::new("Math", epoch(10));
        assert!(suite.seal(epoch(5)));

        assert_eq!(suite.duration(), Duration::ZERO);
    }

    #[test]
    fn converts_failed_event() {
        let case = TestCase::from_event(
            &test_of(Run::failed(
                "Math",
                "subtracts",
                Duration::from_millis(2),
                "expected 1 got 2",
                "at line 5",
            )),
            true,
        );

        assert_eq!(case.classname, "Math");
        assert_eq!(case.time, Duration::from_millis(2));
        assert_eq!(
            case.status,
            Status::Failed {
                message: "expected 1 got 2".into(),
                detail: "at line 5".into(),
            },
        );
    }

    #[test]
    fn omits_stack_when_disabled() {
        let case = TestCase::from_event(
            &test_of(Run::failed("M", "t", Duration::ZERO, "msg", "stack")),
            false,
        );

        assert_eq!(
            case.status,
            Status::Failed {
                message: "msg".into(),
                detail: String::new(),
            },
        );
    }

    #[test]
    fn substitutes_missing_failure_texts() {
        let test = event::Test::new(
            "Math",
            "broken",
            None,
            Outcome::Failed(Failure::default()),
        );
        let case = TestCase::from_event(&test, true);

        assert_eq!(case.time, Duration::ZERO);
        assert_eq!(
            case.status,
            Status::Failed {
                message: String::new(),
                detail: String::new(),
            },
        );
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(seconds(Duration::ZERO), "0");
        assert_eq!(seconds(Duration::from_millis(1)), "0.001");
        assert_eq!(seconds(Duration::from_millis(2)), "0.002");
        assert_eq!(seconds(Duration::from_millis(1500)), "1.5");
        assert_eq!(seconds(Duration::from_secs(2)), "2");
        assert_eq!(seconds(Duration::from_micros(999)), "0");
    }
}
