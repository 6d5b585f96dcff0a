//! Russian: fold ё and э onto е.

use super::{map_chars, NormalizedText};

fn fold(c: char) -> Option<&'static str> {
    match c {
        'ё' | 'э' => Some("е"),
        'Ё' | 'Э' => Some("Е"),
        _ => None,
    }
}

pub(super) fn normalize(source: &str) -> NormalizedText {
    map_chars(source, fold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_yo_and_e() {
        assert_eq!(normalize("ёбанная это").text, "ебанная ето");
        assert_eq!(normalize("Ёж").text, "Еж");
    }

    #[test]
    fn test_preserves_length() {
        let n = normalize("ёлка");
        assert_eq!(n.char_len(), 4);
    }
}
