//! Line preparation for the log pane: escape stripping, tab expansion and word wrap.
//!
//! Wrapped segments keep their tabs; a tab is measured up to the next stop counted from
//! the start of its segment, which is where the renderer expands it.

use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 8;

/// Remove ANSI escape sequences (CSI, OSC and two-byte escapes) and stray carriage returns.
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.contains(['\x1b', '\r']) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {}
            '\x1b' => match chars.next() {
                Some('[') => {
                    // Parameters and intermediates, then one final byte in 0x40..=0x7e.
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Replace tabs with spaces up to the next tab stop.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            out.push(c);
            column += c.width().unwrap_or(0);
        }
    }
    Cow::Owned(out)
}

/// Columns taken by `c` when it starts at `column`.
fn advance(column: usize, c: char) -> usize {
    if c == '\t' {
        TAB_STOP - column % TAB_STOP
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display width of `text` drawn from column 0, with tabs reaching the next stop.
pub fn display_width(text: &str) -> usize {
    text.chars().fold(0, |column, c| column + advance(column, c))
}

/// Word-wrap `line` into segments of at most `width` display columns.
///
/// Breaks after the last whitespace that fits; words longer than `width` are split.
/// No character is dropped, so the segments concatenate back to `line`. An empty line
/// yields a single empty segment.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    // Byte index just past the last whitespace in `current`.
    let mut break_at: Option<usize> = None;

    for c in line.chars() {
        let mut char_width = advance(current_width, c);

        if current_width + char_width > width && !current.is_empty() {
            match break_at {
                Some(byte) if byte < current.len() => {
                    let rest = current.split_off(byte);
                    segments.push(std::mem::replace(&mut current, rest));
                    current_width = display_width(&current);
                }
                _ => {
                    segments.push(std::mem::take(&mut current));
                    current_width = 0;
                }
            }
            break_at = None;
            char_width = advance(current_width, c);

            // A wide character or tab may still not fit after the whitespace break.
            if current_width + char_width > width && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
                current_width = 0;
                char_width = advance(0, c);
            }
        }

        current.push(c);
        current_width += char_width;
        if c.is_whitespace() {
            break_at = Some(current.len());
        }
    }

    if !current.is_empty() || segments.is_empty() {
        segments.push(current);
    }
    segments
}
