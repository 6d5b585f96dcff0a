//! French: strip accents and cedillas, unfold ligatures.

use super::{map_chars, NormalizedText};

fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'â' | 'ä' | 'á' => "a",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'À' | 'Â' | 'Ä' | 'Á' => "A",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ò' | 'Ó' | 'Ô' | 'Ö' => "O",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'Ý' | 'Ÿ' => "Y",
        'ç' => "c",
        'Ç' => "C",
        'œ' => "oe",
        'Œ' => "OE",
        'æ' => "ae",
        'Æ' => "AE",
        _ => return None,
    };
    Some(folded)
}

pub(super) fn normalize(source: &str) -> NormalizedText {
    map_chars(source, fold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize("Tu es un connard, ça m'énerve").text, "Tu es un connard, ca m'enerve");
        assert_eq!(normalize("ÀÉÎÕÛ").text, "AEIÕU");
    }

    #[test]
    fn test_unfolds_ligatures() {
        let n = normalize("cœur Æther");
        assert_eq!(n.text, "coeur AEther");
        assert_eq!(n.origin, vec![0, 1, 1, 2, 3, 4, 5, 5, 6, 7, 8, 9]);
    }
}
