//! Canonical spacing of a validated number.

use crate::config::Layout;
use crate::normalize::NormalizedNumber;

/// Splits a number into space-separated groups.
///
/// Leading groups take their declared widths from the front of the number.
/// The last group always takes every remaining digit, whatever width or range
/// the layout declares for it. Without a layout the number is returned whole.
///
/// Expects a number that already passed `validate_length`; shorter input is
/// cut wherever its digits run out.
pub fn format_number(number: &NormalizedNumber, layout: Option<&Layout>) -> String {
    let Some(layout) = layout else {
        return number.to_string();
    };

    let s = number.as_str();
    let mut groups: Vec<&str> = Vec::with_capacity(layout.leading().len() + 1);
    let mut position = 0;
    for &width in layout.leading() {
        let end = (position + width).min(s.len());
        groups.push(&s[position..end]);
        position = end;
    }
    groups.push(&s[position..]);

    groups.join(" ")
}
