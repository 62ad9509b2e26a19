//! Room-name text normalization shared by the catalog builder and the query path.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub const STOPWORDS: &[&str] = &[
    "and", "with", "the", "a", "an", "of", "for", "in", "at", "to", "by", "on", "or",
];

static RE_NUMBER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(one|two|three|four|five|six|seven|eight|nine)\b").expect("Invalid regex")
});

/// Phrase rewrites, applied in order. Bed sizes tolerate any punctuation before `bed(s)`.
static REPLACEMENTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"&", " and "),
        (r"\+", " and "),
        (r"\bking\W+beds?\b", "king bed"),
        (r"\btwin\W+beds?\b", "twin bed"),
        (r"\bdouble\W+beds?\b", "double bed"),
        (r"\bqueen\W+beds?\b", "queen bed"),
    ]
    .into_iter()
    .map(|(pat, rep)| (Regex::new(pat).expect("Invalid regex"), rep))
    .collect()
});

static RE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex"));

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

fn number_word_digit(word: &str) -> &'static str {
    match word {
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        _ => "9",
    }
}

/// Decomposes to NFKD and drops combining marks.
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical form of a room name: lowercase, accent-free, number words as
/// digits, bed phrases singular, punctuation replaced by single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut s = strip_accents(&lowered);

    s = RE_NUMBER_WORD
        .replace_all(&s, |caps: &Captures| number_word_digit(&caps[1]))
        .into_owned();

    for (pattern, replacement) in REPLACEMENTS.iter() {
        s = pattern.replace_all(&s, *replacement).into_owned();
    }

    let s = RE_PUNCTUATION.replace_all(&s, " ");
    RE_WHITESPACE.replace_all(&s, " ").trim().to_string()
}

/// Normalizes and splits on whitespace, keeping stopwords.
pub fn split_tokens(text: &str) -> Vec<String> {
    normalize(text).split_whitespace().map(str::to_string).collect()
}

pub fn remove_stopwords(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Normalize, split and drop stopwords. Order and duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    remove_stopwords(split_tokens(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_accents() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("  Chambre Supérieure  "), "chambre superieure");
        assert_eq!(normalize("ÉTAGE Élevé"), "etage eleve");
    }

    #[test]
    fn number_words_only_as_whole_words() {
        assert_eq!(normalize("Two Bedroom Apartment"), "2 bedroom apartment");
        assert_eq!(normalize("nine"), "9");
        assert_eq!(normalize("Ninety Nine"), "ninety 9");
        assert_eq!(normalize("someone"), "someone");
        assert_eq!(normalize("One-Bedroom"), "1 bedroom");
    }

    #[test]
    fn ampersand_and_plus_become_and() {
        assert_eq!(normalize("Bed&Breakfast"), "bed and breakfast");
        assert_eq!(normalize("Room + Balcony"), "room and balcony");
    }

    #[test]
    fn plural_bed_phrases_collapse() {
        assert_eq!(normalize("Room, 2 Queen Beds"), "room 2 queen bed");
        assert_eq!(normalize("Two Twin Beds"), "2 twin bed");
        assert_eq!(normalize("double-beds"), "double bed");
        assert_eq!(normalize("king  beds"), "king bed");
        assert_eq!(normalize("King Bedside View"), "king bedside view");
    }

    #[test]
    fn punctuation_and_whitespace_collapse() {
        assert_eq!(normalize("Deluxe Room (Sea View) - Non-Smoking!"), "deluxe room sea view non smoking");
        assert_eq!(normalize("\tSuite\n\n Junior "), "suite junior");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Deluxe King Room, 1 King Bed",
            "Two Queen Beds & Sofa-Bed",
            "Chambre Double Supérieure + Balcon",
            "king -- beds",
            "Family Suite (3 Twin Beds), Non Smoking",
            "ninety-nine one nine",
            "",
            "  ÅÄÖ ---  ",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn tokenize_drops_stopwords_and_keeps_order() {
        assert_eq!(
            tokenize("Twin Room with Balcony and a View of the Sea"),
            vec!["twin", "room", "balcony", "view", "sea"]
        );
        assert_eq!(tokenize("Room Room"), vec!["room", "room"]);
        assert_eq!(split_tokens("Room with View"), vec!["room", "with", "view"]);
    }
}
