//! Shared rendering utilities.
//!
//! Low-level text helpers used across UI components: locating search matches,
//! painting highlighted ranges, and padding or centering text by character
//! count rather than byte length, which matters for Turkish titles.
//!
//! # Example
//!
//! ```rust
//! use eventscout::ui::helpers::{highlighted, search_highlight_ranges};
//! use eventscout::ui::Theme;
//!
//! let ranges = search_highlight_ranges("Kıyı Temizliği", "temiz");
//! assert_eq!(ranges, vec![(5, 10)]);
//!
//! let out = highlighted("Kıyı Temizliği", &ranges, &Theme::plain());
//! assert_eq!(out, "Kıyı Temizliği");
//! ```

use crate::ui::theme::Theme;

/// Character ranges of `text` where `query` occurs, case-insensitively.
///
/// Matches do not overlap. Ranges are `(start, end)` character indices with an
/// exclusive end. A blank query yields no ranges.
#[must_use]
pub fn search_highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercasing may expand a character, so keep each lowered char's origin.
    let mut lowered = Vec::new();
    let mut origin = Vec::new();
    for (index, c) in text.chars().enumerate() {
        for lower in c.to_lowercase() {
            lowered.push(lower);
            origin.push(index);
        }
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= lowered.len() {
        if lowered[i..i + needle.len()] == needle[..] {
            let start = origin[i];
            let end = origin[i + needle.len() - 1] + 1;
            ranges.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Paints `ranges` of `text` with the theme's match highlight colors.
///
/// Ranges beyond the end of `text` are clipped. After each highlight the
/// styling is reset and `text_normal` re-applied.
#[must_use]
pub fn highlighted(text: &str, ranges: &[(usize, usize)], theme: &Theme) -> String {
    if ranges.is_empty() || theme.is_plain() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 48);
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        current = end;
    }

    out.extend(&chars[current..]);
    out
}

/// Number of characters in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Spaces needed to pad `text` to `target` characters.
#[must_use]
pub fn padding(text: &str, target: usize) -> String {
    " ".repeat(target.saturating_sub(width(text)))
}

/// `text` left-aligned in a field of `target` characters.
#[must_use]
pub fn pad(text: &str, target: usize) -> String {
    format!("{text}{}", padding(text, target))
}

/// `text` centered in a field of `cols` characters, left padding rounded down.
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let left = cols.saturating_sub(width(text)) / 2;
    let right = cols.saturating_sub(left + width(text));
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Wraps `text` to lines of at most `cols` characters, breaking at spaces.
///
/// Words longer than `cols` get a line of their own.
#[must_use]
pub fn wrap(text: &str, cols: usize) -> Vec<String> {
    let cols = cols.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && width(&line) + 1 + width(word) > cols {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_every_occurrence_case_insensitively() {
        assert_eq!(
            search_highlight_ranges("STEM Kız Öğrenci Kampı stem", "stem"),
            vec![(0, 4), (23, 27)]
        );
        assert!(search_highlight_ranges("Sahil", "  ").is_empty());
        assert!(search_highlight_ranges("Sahil", "dağ").is_empty());
    }

    #[test]
    fn expanding_lowercase_maps_back_to_source_chars() {
        // 'İ' lowercases to two chars: 'i' and a combining dot.
        assert_eq!(search_highlight_ranges("İzmir Sahil", "sahil"), vec![(6, 11)]);
    }

    #[test]
    fn highlight_wraps_ranges_in_escapes() {
        let theme = Theme::from_name("meadow").unwrap();
        let out = highlighted("abcdef", &[(1, 3), (10, 12)], &theme);
        assert!(out.starts_with('a'));
        assert!(out.contains(&format!("{}bc{}", Theme::bg(&theme.colors.match_highlight_bg), Theme::reset())));
        assert!(out.ends_with("def"));
    }

    #[test]
    fn padding_counts_characters() {
        assert_eq!(pad("Çevre", 7), "Çevre  ");
        assert_eq!(pad("Eskişehir", 4), "Eskişehir");
        assert_eq!(centered("ab", 6), "  ab  ");
        assert_eq!(centered("abc", 6), " abc  ");
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap("Kıyı şeridinde plastik atık toplama", 15),
            vec!["Kıyı şeridinde", "plastik atık", "toplama"]
        );
        assert!(wrap("", 10).is_empty());
    }
}
