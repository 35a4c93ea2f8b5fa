use std::str::FromStr;

use termcolor::ColorChoice;

/// A command line argument or environment value that configures the coloring of the output
///
/// # Example
///
/// ```rust
/// use irbridge_diagnostics::{ColorChoice, UseColors};
/// use std::str::FromStr;
///
/// let color = UseColors::from_str("never").unwrap();
/// assert_eq!(ColorChoice::from(color), ColorChoice::Never);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UseColors(pub ColorChoice);
impl UseColors {
    /// Allowed string variants to be used on the command line
    pub const VARIANTS: &'static [&'static str] = &["auto", "always", "ansi", "never"];
}
impl FromStr for UseColors {
    type Err = &'static str;

    fn from_str(src: &str) -> Result<UseColors, &'static str> {
        match src {
            _ if src.eq_ignore_ascii_case("auto") => Ok(UseColors(ColorChoice::Auto)),
            _ if src.eq_ignore_ascii_case("always") => Ok(UseColors(ColorChoice::Always)),
            _ if src.eq_ignore_ascii_case("ansi") => Ok(UseColors(ColorChoice::AlwaysAnsi)),
            _ if src.eq_ignore_ascii_case("never") => Ok(UseColors(ColorChoice::Never)),
            _ => Err("valid values: auto, always, ansi, never"),
        }
    }
}
impl From<UseColors> for ColorChoice {
    fn from(colors: UseColors) -> Self {
        colors.0
    }
}
