//! CLI options and coloring configuration of the [`Basic`] writer.
//!
//! [`Basic`]: super::Basic

use std::str::FromStr;

use smart_default::SmartDefault;

/// CLI options of a [`Basic`] [`Writer`].
///
/// [`Basic`]: super::Basic
/// [`Writer`]: crate::Writer
#[derive(Clone, Copy, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Coloring policy for a console output.
    #[arg(
        long,
        value_name = "auto|always|never",
        default_value = "auto",
        global = true
    )]
    #[default(Coloring::Auto)]
    pub color: Coloring,
}

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coloring_case_insensitively() {
        assert_eq!("auto".parse(), Ok(Coloring::Auto));
        assert_eq!("ALWAYS".parse(), Ok(Coloring::Always));
        assert_eq!("Never".parse(), Ok(Coloring::Never));
        assert!("sometimes".parse::<Coloring>().is_err());
    }

    #[test]
    fn colors_automatically_by_default() {
        assert_eq!(Cli::default().color, Coloring::Auto);
    }
}
