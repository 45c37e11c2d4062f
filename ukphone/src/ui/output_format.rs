//! Styled output helpers shared by the commands and the entry point.
//!
//! Colour is applied only when the caller says the destination supports it,
//! so piped output stays plain.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme colour for `entry` to `text` if `enable_colors` is set.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

/// Writes `Error: <msg>` in the theme's error colour.
pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    let line = format!("Error: {}", msg);
    writeln!(writer, "{}", styled(&line, ThemeEntry::Error, theme, enable_colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_when_colour_disabled() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_error_message(&mut buf, "bad table", &theme, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: bad table\n");
    }

    #[test]
    fn coloured_output_wraps_in_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let out = styled("020 7946 0123", ThemeEntry::Valid, &theme, true);
        assert!(out.starts_with("\u{1b}["));
        assert!(out.contains("020 7946 0123"));
    }
}
