//! IRC text formatting.
//!
//! IRC message bodies interleave printable text with single control bytes
//! toggling bold, italic, underline, strike-through and reverse video, plus
//! a parameterized color code. [`TextFormat`] converts such text into plain
//! text, a sequence of [`StyledRun`]s, or HTML, and linkifies URLs found in
//! the rendered text.
//!
//! # Example
//!
//! ```
//! use slirc_client::format::TextFormat;
//!
//! let format = TextFormat::new();
//! assert_eq!(format.to_plain_text("\x02bold\x0f"), "bold");
//! assert_eq!(
//!     format.to_html("\x02bold\x0f"),
//!     "<span style='font-weight: bold'>bold</span>"
//! );
//! ```

mod html;
mod parse;

use std::collections::HashMap;

use regex::Regex;

use crate::error::Result;

/// Formatting attributes active for a span of text.
///
/// Attributes are independent toggles; colors are palette indices resolved
/// through the [`TextFormat`] color table at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
    /// Struck-through text.
    pub strike: bool,
    /// Reverse video.
    pub reverse: bool,
    /// Foreground color index.
    pub fg: Option<i32>,
    /// Background color index.
    pub bg: Option<i32>,
}

impl Style {
    /// Whether every attribute is at its default.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A maximal span of text sharing one style and link state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledRun {
    /// Literal text, control bytes removed.
    pub text: String,
    /// Style attributes active for this span.
    pub style: Style,
    /// Absolute URL when this span is part of a detected link. Orthogonal
    /// to style: a run can be both bold and a link.
    pub link: Option<String>,
}

/// Ordered sequence of styled runs.
pub type StyledText = Vec<StyledRun>;

/// Default color names for palette indices 0 through 15.
const DEFAULT_COLOR_NAMES: [&str; 16] = [
    "white",
    "black",
    "blue",
    "green",
    "red",
    "brown",
    "purple",
    "orange",
    "yellow",
    "lightgreen",
    "cyan",
    "lightcyan",
    "lightblue",
    "pink",
    "gray",
    "lightgray",
];

/// Default URL detection pattern.
///
/// Matches explicit `scheme://` URLs, scheme-less `www.` and `ftp.` hosts,
/// and bare e-mail addresses.
pub const DEFAULT_URL_PATTERN: &str = concat!(
    r#"\b(?:[a-z][a-z0-9+.-]*://[^\s<>'"]+"#,
    r#"|www\.[^\s<>'"]+"#,
    r#"|ftp\.[^\s<>'"]+"#,
    r#"|[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})"#
);

/// Converts IRC-formatted text to plain text, styled runs, or HTML.
///
/// Holds only configuration: the color-name table and the URL detection
/// pattern. Rendering itself is a pure function of the input text and this
/// configuration.
pub struct TextFormat {
    color_overrides: HashMap<i32, String>,
    url_pattern: String,
    url_regex: Option<Regex>,
}

impl TextFormat {
    /// Create a format with the default palette and URL pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color_overrides: HashMap::new(),
            url_pattern: DEFAULT_URL_PATTERN.to_string(),
            // The default pattern is a constant; it always compiles.
            url_regex: Regex::new(DEFAULT_URL_PATTERN).ok(),
        }
    }

    /// The color name for `index`, with an empty fallback.
    ///
    /// See [`color_name_or`](Self::color_name_or).
    #[must_use]
    pub fn color_name(&self, index: i32) -> String {
        self.color_name_or(index, "")
    }

    /// The color name for `index`, or `fallback` when the index has
    /// neither a default nor an override.
    ///
    /// Indices 0 through 15 carry the standard palette by default.
    #[must_use]
    pub fn color_name_or(&self, index: i32, fallback: &str) -> String {
        if let Some(name) = self.color_overrides.get(&index) {
            return name.clone();
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| DEFAULT_COLOR_NAMES.get(i))
            .map_or_else(|| fallback.to_string(), |name| (*name).to_string())
    }

    /// Assign a name to a color index.
    ///
    /// Any `i32` key is accepted and stored verbatim, including negative
    /// and out-of-palette indices; this is an override map, not a
    /// range-checked palette.
    pub fn set_color_name(&mut self, index: i32, name: impl Into<String>) {
        self.color_overrides.insert(index, name.into());
    }

    /// The URL detection pattern source.
    #[must_use]
    pub fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    /// Set the URL detection pattern.
    ///
    /// An empty pattern disables link detection entirely. An invalid
    /// pattern is rejected with [`ClientError::Pattern`] and leaves the
    /// previous pattern in place.
    ///
    /// [`ClientError::Pattern`]: crate::ClientError::Pattern
    pub fn set_url_pattern(&mut self, pattern: impl Into<String>) -> Result<()> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            self.url_pattern = pattern;
            self.url_regex = None;
            return Ok(());
        }
        let regex = Regex::new(&pattern)?;
        self.url_pattern = pattern;
        self.url_regex = Some(regex);
        Ok(())
    }

    pub(crate) fn url_regex(&self) -> Option<&Regex> {
        self.url_regex.as_ref()
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFormat")
            .field("url_pattern", &self.url_pattern)
            .field("color_overrides", &self.color_overrides)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_complete() {
        let format = TextFormat::new();
        for i in 0..=15 {
            assert!(!format.color_name(i).is_empty());
        }
        assert_eq!(format.color_name(0), "white");
        assert_eq!(format.color_name(4), "red");
        assert_eq!(format.color_name(15), "lightgray");
    }

    #[test]
    fn out_of_palette_uses_fallback() {
        let format = TextFormat::new();
        assert_eq!(format.color_name(-1), "");
        assert_eq!(format.color_name(16), "");
        assert_eq!(format.color_name_or(-1, "fallback"), "fallback");
    }

    #[test]
    fn overrides_accept_any_integer() {
        let mut format = TextFormat::new();
        for i in -1..=123 {
            format.set_color_name(i, i.to_string());
            assert_eq!(format.color_name(i), i.to_string());
        }
    }

    #[test]
    fn invalid_pattern_keeps_previous() {
        let mut format = TextFormat::new();
        assert!(format.set_url_pattern("(").is_err());
        assert_eq!(format.url_pattern(), DEFAULT_URL_PATTERN);
    }

    #[test]
    fn empty_pattern_disables_detection() {
        let mut format = TextFormat::new();
        format.set_url_pattern("").unwrap();
        assert_eq!(format.url_pattern(), "");
        assert!(format.url_regex().is_none());
    }
}
