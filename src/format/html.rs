//! Rendering and link detection.
//!
//! Plain-text rendering discards every control byte and parameter; HTML
//! rendering wraps each non-default run in a `<span>` with inline style
//! declarations and each link run in an anchor. Link detection runs over
//! the already-scanned runs, so style boundaries are never disturbed: a
//! URL crossing a style boundary becomes one link run on each side, both
//! pointing at the same resolved URL.

use regex::Regex;

use super::{parse, Style, StyledRun, StyledText, TextFormat};

impl TextFormat {
    /// Strip all formatting codes, returning the literal text.
    #[must_use]
    pub fn to_plain_text(&self, input: &str) -> String {
        parse::scan(input).into_iter().map(|run| run.text).collect()
    }

    /// Scan `input` into styled runs, with link detection applied.
    #[must_use]
    pub fn parse(&self, input: &str) -> StyledText {
        let runs = parse::scan(input);
        match self.url_regex() {
            Some(regex) => linkify(runs, regex),
            None => runs,
        }
    }

    /// Render `input` as HTML.
    ///
    /// Styled runs become `<span style='…'>` wrappers, link runs become
    /// `<a href='…'>` anchors nested inside their style wrapper, and text
    /// is entity-escaped.
    #[must_use]
    pub fn to_html(&self, input: &str) -> String {
        let mut out = String::new();
        for run in self.parse(input) {
            let text = escape_text(&run.text);
            let inner = match &run.link {
                Some(url) => format!("<a href='{}'>{}</a>", escape_attr(url), text),
                None => text,
            };
            match self.style_declarations(&run.style) {
                Some(style) => {
                    out.push_str("<span style='");
                    out.push_str(&style);
                    out.push_str("'>");
                    out.push_str(&inner);
                    out.push_str("</span>");
                }
                None => out.push_str(&inner),
            }
        }
        out
    }

    /// Inline CSS declarations for a style, or `None` for a default one.
    ///
    /// Reverse video has no CSS mapping and contributes nothing; color
    /// indices that resolve to an empty name are omitted.
    fn style_declarations(&self, style: &Style) -> Option<String> {
        let mut decls: Vec<String> = Vec::new();
        if style.bold {
            decls.push("font-weight: bold".to_string());
        }
        match (style.underline, style.strike) {
            (true, true) => decls.push("text-decoration: underline line-through".to_string()),
            (true, false) => decls.push("text-decoration: underline".to_string()),
            (false, true) => decls.push("text-decoration: line-through".to_string()),
            (false, false) => {}
        }
        if style.italic {
            decls.push("font-style: italic".to_string());
        }
        if let Some(fg) = style.fg {
            let name = self.color_name(fg);
            if !name.is_empty() {
                decls.push(format!("color:{name}"));
            }
        }
        if let Some(bg) = style.bg {
            let name = self.color_name(bg);
            if !name.is_empty() {
                decls.push(format!("background-color:{name}"));
            }
        }
        if decls.is_empty() {
            None
        } else {
            Some(decls.join(";"))
        }
    }
}

/// Mark the spans of `runs` matched by `regex` as links.
fn linkify(runs: Vec<StyledRun>, regex: &Regex) -> Vec<StyledRun> {
    let plain: String = runs.iter().map(|run| run.text.as_str()).collect();
    let matches: Vec<(std::ops::Range<usize>, String)> = regex
        .find_iter(&plain)
        .map(|m| (m.range(), resolve_url(m.as_str())))
        .collect();
    if matches.is_empty() {
        return runs;
    }

    let mut out = Vec::new();
    let mut offset = 0;
    for run in runs {
        let end = offset + run.text.len();
        let mut cursor = 0;
        for (range, url) in &matches {
            let start = range.start.max(offset);
            let stop = range.end.min(end);
            if start >= stop {
                continue;
            }
            let (local_start, local_stop) = (start - offset, stop - offset);
            if cursor < local_start {
                out.push(StyledRun {
                    text: run.text[cursor..local_start].to_string(),
                    style: run.style,
                    link: None,
                });
            }
            out.push(StyledRun {
                text: run.text[local_start..local_stop].to_string(),
                style: run.style,
                link: Some(url.clone()),
            });
            cursor = local_stop;
        }
        if cursor < run.text.len() {
            out.push(StyledRun {
                text: run.text[cursor..].to_string(),
                style: run.style,
                link: None,
            });
        }
        offset = end;
    }
    out
}

/// Resolve a matched fragment to an absolute URL.
///
/// Scheme-less `www.` hosts get `http`, `ftp.` hosts get `ftp`, addresses
/// with an `@` and no scheme get `mailto`; explicit schemes pass through.
fn resolve_url(fragment: &str) -> String {
    if fragment.starts_with("www.") {
        format!("http://{fragment}")
    } else if fragment.starts_with("ftp.") {
        format!("ftp://{fragment}")
    } else if fragment.contains("://") {
        fragment.to_string()
    } else if fragment.contains('@') {
        format!("mailto:{fragment}")
    } else {
        fragment.to_string()
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('\'', "&#39;")
}
