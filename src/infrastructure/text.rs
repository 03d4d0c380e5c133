//! Text helpers for Turkish catalog data.
//!
//! Catalog labels are Turkish. Sorting option lists needs Turkish alphabetical
//! order (ç after c, ı before i, ...), and matching what users type on a
//! keyboard without Turkish letters needs an ASCII fold.

use std::cmp::Ordering;

/// Lowercase Turkish alphabet in collation order.
const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

/// Lowercases with Turkish casing rules (`I` → `ı`, `İ` → `i`).
#[must_use]
pub fn turkish_lowercase(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            'I' => vec!['ı'],
            'İ' => vec!['i'],
            other => other.to_lowercase().collect(),
        })
        .collect()
}

/// Case-insensitive comparison in Turkish alphabetical order.
///
/// Letters outside the Turkish alphabet (q, w, x, digits, punctuation) sort by
/// code point after the letters they are compared with.
#[must_use]
pub fn turkish_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn collation_key(s: &str) -> Vec<u32> {
    turkish_lowercase(s)
        .chars()
        .map(|c| {
            TURKISH_ALPHABET.chars().position(|letter| letter == c).map_or_else(
                || 0x100 + u32::from(c),
                |pos| u32::try_from(pos).unwrap_or(u32::MAX) + 0x40,
            )
        })
        .collect()
}

/// Folds Turkish letters to their closest ASCII form and lowercases.
///
/// `"Çevre"` → `"cevre"`, `"Gençlik"` → `"genclik"`, `"İzmir"` → `"izmir"`.
#[must_use]
pub fn fold_turkish(s: &str) -> String {
    turkish_lowercase(s)
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Truncates to at most `max` characters, marking the cut with `...`.
///
/// Operates on characters, never splitting a multi-byte letter.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_in_turkish_alphabet_order() {
        let mut words = vec!["Çocuk", "Sahil", "Afet", "Şehir", "Cami", "Ilgaz", "İzmir", "Üsküdar", "Uzaktan"];
        words.sort_by(|a, b| turkish_cmp(a, b));
        assert_eq!(
            words,
            vec!["Afet", "Cami", "Çocuk", "Ilgaz", "İzmir", "Sahil", "Şehir", "Uzaktan", "Üsküdar"]
        );
    }

    #[test]
    fn comparison_ignores_case() {
        assert_eq!(turkish_cmp("stem", "STEM"), Ordering::Equal);
    }

    #[test]
    fn folds_to_ascii() {
        assert_eq!(fold_turkish("Çevre"), "cevre");
        assert_eq!(fold_turkish("Gençlik"), "genclik");
        assert_eq!(fold_turkish("İzmir"), "izmir");
        assert_eq!(fold_turkish("KIYI"), "kiyi");
    }

    #[test]
    fn truncation_respects_multibyte_letters() {
        assert_eq!(truncate_chars("Kıyı", 10), "Kıyı");
        assert_eq!(truncate_chars("Şehir Ormanı Rehabilitasyonu", 10), "Şehir O...");
    }
}
