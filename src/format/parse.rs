//! Control-code scanner.
//!
//! One left-to-right pass over the input, tracking the attribute state the
//! control bytes toggle or set. Every control byte forces a run boundary;
//! printable characters, tabs and newlines accumulate into the current
//! run. The byte set is
//! the mIRC one: two distinct underline bytes alias to the same attribute,
//! and the color byte consumes up to two digit groups as parameters.

use std::iter::Peekable;
use std::str::Chars;

use super::{Style, StyledRun};

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const RESET: char = '\x0f';
const STRIKE: char = '\x13';
const UNDERLINE: char = '\x15';
const REVERSE: char = '\x16';
const ITALIC: char = '\x1d';
const UNDERLINE_ALT: char = '\x1f';

/// Scan `input` into style runs. No link detection here; that layer is
/// applied over the finished runs.
pub(super) fn scan(input: &str) -> Vec<StyledRun> {
    let mut scanner = Scanner::default();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            BOLD => scanner.toggle(|s| &mut s.bold),
            STRIKE => scanner.toggle(|s| &mut s.strike),
            UNDERLINE | UNDERLINE_ALT => scanner.toggle(|s| &mut s.underline),
            REVERSE => scanner.toggle(|s| &mut s.reverse),
            ITALIC => scanner.toggle(|s| &mut s.italic),
            RESET => {
                scanner.flush();
                scanner.style = Style::default();
            }
            COLOR => {
                scanner.flush();
                scanner.color(&mut chars);
            }
            // Tab and newline are message text, not formatting.
            '\t' | '\n' => scanner.text.push(c),
            // Stray control bytes are dropped without touching state.
            c if c.is_control() => {}
            c => scanner.text.push(c),
        }
    }

    scanner.flush();
    scanner.runs
}

#[derive(Default)]
struct Scanner {
    style: Style,
    text: String,
    runs: Vec<StyledRun>,
}

impl Scanner {
    /// Close the current run, if it has any text.
    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.runs.push(StyledRun {
                text: std::mem::take(&mut self.text),
                style: self.style,
                link: None,
            });
        }
    }

    fn toggle(&mut self, attr: fn(&mut Style) -> &mut bool) {
        self.flush();
        let flag = attr(&mut self.style);
        *flag = !*flag;
    }

    /// Apply a color byte: up to two digit groups as foreground and (after
    /// a comma directly followed by a digit) background indices.
    ///
    /// A bare color byte clears both channels. Re-specifying the index a
    /// channel already carries toggles that channel off. A comma without a
    /// following digit is literal text and stays unconsumed.
    fn color(&mut self, chars: &mut Peekable<Chars<'_>>) {
        match take_digits(chars) {
            None => {
                self.style.fg = None;
                self.style.bg = None;
            }
            Some(fg) => {
                self.style.fg = if self.style.fg == Some(fg) {
                    None
                } else {
                    Some(fg)
                };

                if chars.peek() == Some(&',') {
                    // Only consume the comma when digits follow it.
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if let Some(bg) = take_digits(&mut lookahead) {
                        chars.next();
                        take_digits(chars);
                        self.style.bg = if self.style.bg == Some(bg) {
                            None
                        } else {
                            Some(bg)
                        };
                    }
                }
            }
        }
    }
}

/// Consume up to two decimal digits, returning their value.
fn take_digits(chars: &mut Peekable<Chars<'_>>) -> Option<i32> {
    let mut value: Option<i32> = None;
    for _ in 0..2 {
        match chars.peek() {
            Some(c) if c.is_ascii_digit() => {
                let digit = *c as i32 - '0' as i32;
                value = Some(value.unwrap_or(0) * 10 + digit);
                chars.next();
            }
            _ => break,
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn plain_text_is_one_run() {
        let runs = scan("hello world");
        assert_eq!(texts(&runs), vec!["hello world"]);
        assert!(runs[0].style.is_plain());
    }

    #[test]
    fn bold_toggles_on_and_off() {
        let runs = scan("foo \x02bold\x02 bar");
        assert_eq!(texts(&runs), vec!["foo ", "bold", " bar"]);
        assert!(!runs[0].style.bold);
        assert!(runs[1].style.bold);
        assert!(!runs[2].style.bold);
    }

    #[test]
    fn underline_bytes_alias() {
        for input in ["\x15under\x0f", "\x1funder\x0f"] {
            let runs = scan(input);
            assert_eq!(texts(&runs), vec!["under"]);
            assert!(runs[0].style.underline);
        }
    }

    #[test]
    fn reset_clears_everything() {
        let runs = scan("\x02\x1d\x1f\x16\x13styled\x0fplain");
        assert_eq!(texts(&runs), vec!["styled", "plain"]);
        let styled = runs[0].style;
        assert!(
            styled.bold && styled.italic && styled.underline && styled.reverse && styled.strike
        );
        assert!(runs[1].style.is_plain());
    }

    #[test]
    fn color_sets_foreground() {
        let runs = scan("\x034red\x0f");
        assert_eq!(texts(&runs), vec!["red"]);
        assert_eq!(runs[0].style.fg, Some(4));
        assert_eq!(runs[0].style.bg, None);
    }

    #[test]
    fn color_sets_foreground_and_background() {
        let runs = scan("\x034,12text");
        assert_eq!(runs[0].style.fg, Some(4));
        assert_eq!(runs[0].style.bg, Some(12));
    }

    #[test]
    fn two_digit_groups_cap_at_two_digits() {
        // "123" reads as index 12 followed by a literal '3'.
        let runs = scan("\x03123");
        assert_eq!(texts(&runs), vec!["3"]);
        assert_eq!(runs[0].style.fg, Some(12));
    }

    #[test]
    fn bare_color_byte_clears_both_channels() {
        let runs = scan("\x034,5colored\x03plain");
        assert_eq!(texts(&runs), vec!["colored", "plain"]);
        assert_eq!(runs[1].style.fg, None);
        assert_eq!(runs[1].style.bg, None);
    }

    #[test]
    fn same_index_toggles_channel_off() {
        let runs = scan("\x034red\x034back");
        assert_eq!(runs[0].style.fg, Some(4));
        assert_eq!(runs[1].style.fg, None);
    }

    #[test]
    fn foreground_only_leaves_background() {
        let runs = scan("\x034,5ab\x037cd");
        assert_eq!(runs[1].style.fg, Some(7));
        assert_eq!(runs[1].style.bg, Some(5));
    }

    #[test]
    fn comma_without_digits_stays_literal() {
        let runs = scan("\x034,text");
        assert_eq!(texts(&runs), vec![",text"]);
        assert_eq!(runs[0].style.fg, Some(4));
        assert_eq!(runs[0].style.bg, None);
    }

    #[test]
    fn color_byte_at_end_of_input_is_harmless() {
        let runs = scan("text\x03");
        assert_eq!(texts(&runs), vec!["text"]);
    }

    #[test]
    fn stray_control_bytes_are_dropped() {
        let runs = scan("a\x01b\x04c");
        assert_eq!(texts(&runs), vec!["abc"]);
    }

    #[test]
    fn tab_and_newline_pass_through_as_text() {
        let runs = scan("a\tb\nc");
        assert_eq!(texts(&runs), vec!["a\tb\nc"]);

        let runs = scan("\x02a\tb\x02");
        assert_eq!(texts(&runs), vec!["a\tb"]);
        assert!(runs[0].style.bold);
    }

    #[test]
    fn control_byte_forces_boundary_even_without_state_change() {
        // Bold toggled on and immediately off: two plain runs.
        let runs = scan("foo\x02\x02bar");
        assert_eq!(texts(&runs), vec!["foo", "bar"]);
        assert!(runs[0].style.is_plain());
        assert!(runs[1].style.is_plain());
    }

    #[test]
    fn empty_input_yields_no_runs() {
        assert!(scan("").is_empty());
        assert!(scan("\x02\x0f").is_empty());
    }
}
