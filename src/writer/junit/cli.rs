//! CLI configuration for JUnit XML writer.

use std::path::PathBuf;

use smart_default::SmartDefault;

/// Default `name` of the `<testsuites>` element.
pub const DEFAULT_NAME: &str = "Tests";

/// CLI options of a [`JUnit`] [`Writer`].
///
/// Every option may be provided via environment variable as well.
///
/// [`JUnit`]: super::JUnit
/// [`Writer`]: crate::Writer
#[derive(Clone, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Path to write JUnit XML report into.
    ///
    /// If it points to an existing directory, the report file is created
    /// inside it. No report is written if omitted.
    #[arg(
        id = "junit-path",
        long = "junit-path",
        env = "JUNIT_REPORT_PATH",
        value_name = "PATH",
        global = true
    )]
    pub path: Option<PathBuf>,

    /// Name of the JUnit XML report.
    #[arg(
        id = "junit-name",
        long = "junit-name",
        env = "JUNIT_REPORT_NAME",
        value_name = "NAME",
        default_value = DEFAULT_NAME,
        global = true
    )]
    #[default(DEFAULT_NAME.to_owned())]
    pub name: String,

    /// Whether to include stack traces into reported failures.
    #[arg(
        id = "junit-stack",
        long = "junit-stack",
        env = "JUNIT_REPORT_STACK",
        value_name = "true|false",
        default_value_t = true,
        action = clap::ArgAction::Set,
        global = true
    )]
    #[default(true)]
    pub stack_traces: bool,
}

impl Cli {
    /// Creates a new [`Cli`] writing the report into the given `path`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}
