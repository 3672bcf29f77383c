//! Colored output for listings and errors.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use raya_access::{AccessListing, OutputSink, PermissionLevel};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled output writer for terminal.
pub struct StyledOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StyledOutput {
    /// Create a new styled output with the given color choice.
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// Write text with a specific color and style.
    pub fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stdout.set_color(&spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Plain text (no color).
    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    /// Newline.
    pub fn newline(&mut self) {
        let _ = writeln!(self.stdout);
    }

    /// Write error message to stderr.
    pub fn stderr_error(&mut self, label: &str, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = write!(self.stderr, "{}", label);
        let _ = self.stderr.reset();
        let _ = writeln!(self.stderr, " {}", text);
    }
}

/// Prints `ls-packages` / `ls-collaborators` results
pub struct ListingOutput {
    styled: StyledOutput,
    json: bool,
}

impl ListingOutput {
    pub fn new(styled: StyledOutput, json: bool) -> Self {
        Self { styled, json }
    }

    /// Report an argument error
    pub fn usage_error(&mut self, message: &str) {
        self.styled.stderr_error("error:", message);
    }
}

impl OutputSink for ListingOutput {
    fn emit(&mut self, listing: AccessListing) {
        if self.json {
            match serde_json::to_string_pretty(&listing) {
                Ok(json) => {
                    self.styled.plain(&json);
                    self.styled.newline();
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize listing"),
            }
            return;
        }

        for (name, permission) in &listing {
            self.styled.write_styled(name, None, true);
            self.styled.plain(": ");
            self.styled
                .write_styled(permission.as_str(), Some(permission_color(*permission)), false);
            self.styled.newline();
        }
    }
}

fn permission_color(permission: PermissionLevel) -> Color {
    match permission {
        PermissionLevel::ReadOnly => Color::Cyan,
        PermissionLevel::ReadWrite => Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flag() {
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        assert!(matches!(resolve_color_choice(Some("always")), ColorChoice::Always));
        assert!(matches!(resolve_color_choice(Some("never")), ColorChoice::Never));
        assert!(matches!(resolve_color_choice(None), ColorChoice::Auto));
    }

    #[test]
    fn test_permission_colors_differ() {
        assert_ne!(
            permission_color(PermissionLevel::ReadOnly),
            permission_color(PermissionLevel::ReadWrite)
        );
    }
}
