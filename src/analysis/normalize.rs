use std::sync::LazyLock;

use regex::Regex;

static RE_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A query after normalization: the whole string for substring matching
/// plus the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub text: String,
    pub tokens: Vec<String>,
}

/// Normalize free text for matching: lowercase, fold Spanish diacritics,
/// replace punctuation with spaces (hyphens survive, so `covid-19` stays
/// one token), collapse whitespace. Pure and deterministic.
pub fn normalize(text: &str) -> NormalizedQuery {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        for lower in c.to_lowercase() {
            folded.push(fold(lower));
        }
    }

    let collapsed = RE_WS.replace_all(folded.trim(), " ").into_owned();
    let tokens = collapsed
        .split(' ')
        .map(|t| t.trim_matches('-'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    NormalizedQuery {
        text: collapsed,
        tokens,
    }
}

/// Normalize a single registry term (alias or keyword) to its matchable form.
pub fn normalize_term(term: &str) -> String {
    normalize(term).text
}

/// Fold one lowercased char. Accented vowels lose their diacritic, `ñ`
/// folds to `n`, anything that is not alphanumeric or a hyphen becomes
/// a space.
fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        '-' => '-',
        c if c.is_alphanumeric() => c,
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_folds_accents() {
        let n = normalize("¿Qué es el ASMA?");
        assert_eq!(n.text, "que es el asma");
        assert_eq!(n.tokens, vec!["que", "es", "el", "asma"]);
    }

    #[test]
    fn keeps_internal_hyphens() {
        let n = normalize("Tengo COVID-19 desde ayer");
        assert_eq!(n.text, "tengo covid-19 desde ayer");
        assert!(n.tokens.contains(&"covid-19".to_string()));
    }

    #[test]
    fn collapses_whitespace_and_punctuation() {
        let n = normalize("  tos,   fiebre...  y   ahogo!! ");
        assert_eq!(n.text, "tos fiebre y ahogo");
    }

    #[test]
    fn folds_enye() {
        assert_eq!(normalize_term("señales de alarma"), "senales de alarma");
    }

    #[test]
    fn strips_stray_hyphen_tokens() {
        let n = normalize("tos - fiebre");
        assert_eq!(n.tokens, vec!["tos", "fiebre"]);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let a = normalize("Cuáles son los síntomas de neumonía?");
        let b = normalize("Cuáles son los síntomas de neumonía?");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let n = normalize("   ");
        assert_eq!(n.text, "");
        assert!(n.tokens.is_empty());
    }
}
