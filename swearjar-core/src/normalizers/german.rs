//! German: expand umlauts and eszett, fold "sch" to "sh".

use super::{case_pattern, map_chars, MappedBuilder, NormalizedText};

fn fold(c: char) -> Option<&'static str> {
    match c {
        'ä' => Some("ae"),
        'Ä' => Some("AE"),
        'ö' => Some("oe"),
        'Ö' => Some("OE"),
        'ü' => Some("ue"),
        'Ü' => Some("UE"),
        'ß' => Some("ss"),
        _ => None,
    }
}

/// Replaces every case-insensitive "sch" with "sh", keeping the case shape.
/// The dropped `c` has no output character; `s` and `h` keep their origins.
fn fold_sch(source: &str) -> NormalizedText {
    let chars: Vec<char> = source.chars().collect();
    let mut out = MappedBuilder::with_capacity(source.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len()
            && chars[i].eq_ignore_ascii_case(&'s')
            && chars[i + 1].eq_ignore_ascii_case(&'c')
            && chars[i + 2].eq_ignore_ascii_case(&'h')
        {
            let replacement = case_pattern(&chars[i..i + 3], "SH", "Sh", "sh");
            let mut r = replacement.chars();
            if let (Some(s), Some(h)) = (r.next(), r.next()) {
                out.push(s, i);
                out.push(h, i + 2);
            }
            i += 3;
            continue;
        }
        out.push(chars[i], i);
        i += 1;
    }
    out.finish()
}

pub(super) fn normalize(source: &str) -> NormalizedText {
    map_chars(source, fold).then(fold_sch)
}
