//! Identifiers derived from human-facing names.

/// Strip the accents that show up in Spanish venue names.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'Ñ' => 'N',
        c => c,
    }
}

/// Short label prefix for a section name.
///
/// - "VIP Norte" → "VN", "Sección A" → "SA" (initials of up to 3 words)
/// - "Platea1" → "P1" (letters followed by digits)
/// - "Palco" → "PA" (first two letters)
pub fn section_prefix(name: &str) -> String {
    let cleaned: String = name.trim().chars().map(fold_accent).collect::<String>().to_uppercase();
    let words: Vec<&str> = cleaned
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .collect();

    match words.as_slice() {
        [] => "S".to_string(),
        [word] => {
            let split = word.find(|c: char| c.is_ascii_digit()).unwrap_or(word.len());
            let (letters, digits) = word.split_at(split);
            let alpha_then_digits = !letters.is_empty()
                && !digits.is_empty()
                && letters.chars().all(|c| c.is_alphabetic())
                && digits.chars().all(|c| c.is_ascii_digit());
            if alpha_then_digits {
                letters.chars().take(1).chain(digits.chars()).collect()
            } else {
                word.chars().take(2).collect()
            }
        }
        words => words.iter().take(3).filter_map(|w| w.chars().next()).collect(),
    }
}

/// Lowercase, dash-separated id: "PLUS DERECHA" → "plus-derecha".
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars().map(fold_accent) {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Spreadsheet-style row label: 0 → "A", 25 → "Z", 26 → "AA", 27 → "AB", …
///
/// `start` shifts the sequence, e.g. `row_label(0, 'C') == "C"`.
pub fn row_label(index: usize, start: char) -> String {
    let offset = (start.to_ascii_uppercase() as u8).saturating_sub(b'A') as usize;
    let mut n = index + offset + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_prefix() {
        assert_eq!(section_prefix("VIP Norte"), "VN");
        assert_eq!(section_prefix("Sección A"), "SA");
        assert_eq!(section_prefix("PLUS DERECHA"), "PD");
        assert_eq!(section_prefix("Platea1"), "P1");
        assert_eq!(section_prefix("Palco"), "PA");
        assert_eq!(section_prefix("Área de prensa extra"), "ADP");
        assert_eq!(section_prefix("  "), "S");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("PLUS DERECHA"), "plus-derecha");
        assert_eq!(slug("Sección  VIP - Central"), "seccion-vip-central");
        assert_eq!(slug("--Diamante--"), "diamante");
    }

    #[test]
    fn test_row_label() {
        assert_eq!(row_label(0, 'A'), "A");
        assert_eq!(row_label(25, 'A'), "Z");
        assert_eq!(row_label(26, 'A'), "AA");
        assert_eq!(row_label(27, 'A'), "AB");
        assert_eq!(row_label(0, 'C'), "C");
        assert_eq!(row_label(24, 'C'), "AA");
        assert_eq!(row_label(702, 'A'), "AAA");
    }
}
