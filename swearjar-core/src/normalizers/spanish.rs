//! Spanish: strip accents, fold ñ, collapse "ll" before a vowel and "rr".

use super::{case_pattern, map_chars, MappedBuilder, NormalizedText};

fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'á' => "a",
        'Á' => "A",
        'é' => "e",
        'É' => "E",
        'í' => "i",
        'Í' => "I",
        'ó' => "o",
        'Ó' => "O",
        'ú' | 'ü' => "u",
        'Ú' | 'Ü' => "U",
        'ñ' => "n",
        'Ñ' => "N",
        _ => return None,
    };
    Some(folded)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü'
    )
}

/// Collapses a two-letter digraph into one letter wherever `accept` allows.
/// The kept letter maps back to the first character of the pair.
fn fold_digraph(
    source: &str,
    letter: char,
    replacement: (&str, &str, &str),
    accept: impl Fn(&[char], usize) -> bool,
) -> NormalizedText {
    let chars: Vec<char> = source.chars().collect();
    let mut out = MappedBuilder::with_capacity(source.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len()
            && chars[i].eq_ignore_ascii_case(&letter)
            && chars[i + 1].eq_ignore_ascii_case(&letter)
            && accept(&chars, i)
        {
            let (upper, title, lower) = replacement;
            out.push_str(case_pattern(&chars[i..i + 2], upper, title, lower), i);
            i += 2;
            continue;
        }
        out.push(chars[i], i);
        i += 1;
    }
    out.finish()
}

pub(super) fn normalize(source: &str) -> NormalizedText {
    map_chars(source, fold)
        .then(|s| {
            fold_digraph(s, 'l', ("Y", "Y", "y"), |chars, i| {
                let at_word_start = i == 0 || !is_word_char(chars[i - 1]);
                let vowel_follows = chars.get(i + 2).is_some_and(|c| is_vowel(*c));
                at_word_start && vowel_follows
            })
        })
        .then(|s| fold_digraph(s, 'r', ("R", "R", "r"), |_, _| true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_enye() {
        assert_eq!(normalize("cabrón pequeño").text, "cabron pequeno");
        assert_eq!(normalize("ÑOÑO").text, "NONO");
    }

    #[test]
    fn test_ll_only_at_word_start_before_vowel() {
        assert_eq!(normalize("llorar").text, "yorar");
        assert_eq!(normalize("Llama").text, "Yama");
        assert_eq!(normalize("LLAMA").text, "YAMA");
        assert_eq!(normalize("calle").text, "calle");
        assert_eq!(normalize("llN").text, "llN");
    }

    #[test]
    fn test_rr_collapses() {
        assert_eq!(normalize("perro").text, "pero");
        assert_eq!(normalize("PERRO").text, "PERO");
        assert_eq!(normalize("Rrr").text, "Rr");
    }

    #[test]
    fn test_origin_tracks_collapsed_pairs() {
        let n = normalize("perro");
        assert_eq!(n.origin, vec![0, 1, 2, 4]);
    }
}
