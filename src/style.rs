//! Colours for the statistics report
use clap::ValueEnum;
use once_cell::sync::Lazy;

/// Whether to colour the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colour if stdout is a terminal that supports it
    #[default]
    Auto,
    /// Always colour
    Always,
    /// Never colour
    Never,
}

/// The escape sequences used to start and end each kind of styled text
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    item_start: &'static str,
    title_start: &'static str,
    end: &'static str,
}

impl StyleSheet {
    /// Styles a value: a count or a duration
    #[must_use]
    pub fn item(&self, s: &str) -> String {
        format!("{}{}{}", self.item_start, s, self.end)
    }
    /// Styles a heading
    #[must_use]
    pub fn title(&self, s: &str) -> String {
        format!("{}{}{}", self.title_start, s, self.end)
    }
}

const GREEN: &str = "\x1B[32m";
const YELLOW: &str = "\x1B[33m";
const RESET: &str = "\x1B[m";
const ALWAYS: StyleSheet = StyleSheet { item_start: GREEN, title_start: YELLOW, end: RESET };
const NEVER: StyleSheet = StyleSheet { item_start: "", title_start: "", end: "" };
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    let use_color = enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some();
    if use_color {
        ALWAYS
    } else {
        NEVER
    }
});

/// The `StyleSheet` for `choice`, probing the terminal the first time `Auto`
/// is asked for
#[must_use]
pub fn colored(choice: ColorChoice) -> &'static StyleSheet {
    match choice {
        ColorChoice::Always => &ALWAYS,
        ColorChoice::Never => &NEVER,
        ColorChoice::Auto => &AUTO,
    }
}
