/// Classifies the capitalization shape of a word and expands the case
/// variants that should be tried against the dictionary. A title-cased
/// word like "Paris" must also be tried as "paris" (sentence start), an
/// all-caps word as its lowercase and capitalized forms, and so on.
use unicode_casing::CharExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cap {
    /// All lowercase (or caseless)
    No,
    /// First letter uppercase, rest lowercase
    Init,
    /// All uppercase
    All,
    /// Mixed case with a lowercase first letter
    Huh,
    /// Mixed case with an uppercase first letter
    HuhInit,
}

pub fn lower(word: &str) -> String {
    word.to_lowercase()
}

pub fn upper(word: &str) -> String {
    word.to_uppercase()
}

/// Titlecase the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let mut out = String::with_capacity(word.len());
    for tc in first.to_titlecase() {
        out.push(tc);
    }
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Lowercase only the first character.
fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let mut out = String::with_capacity(word.len());
    for lc in first.to_lowercase() {
        out.push(lc);
    }
    out.push_str(chars.as_str());
    out
}

pub fn guess(word: &str) -> Cap {
    if word == lower(word) {
        return Cap::No;
    }
    if word == upper(word) {
        return Cap::All;
    }
    let mut chars = word.chars();
    let first_upper = chars.next().map_or(false, char::is_uppercase);
    let rest = chars.as_str();
    if first_upper && rest == lower(rest) {
        Cap::Init
    } else if first_upper {
        Cap::HuhInit
    } else {
        Cap::Huh
    }
}

/// The capitalization type of `word`, and the case forms to look up.
/// The original spelling always comes first.
pub fn variants(word: &str) -> (Cap, Vec<String>) {
    let captype = guess(word);
    let variants = match captype {
        Cap::No | Cap::Huh => vec![word.to_string()],
        Cap::Init => vec![word.to_string(), lower(word)],
        Cap::HuhInit => vec![word.to_string(), lower_first(word)],
        Cap::All => vec![word.to_string(), lower(word), capitalize(word)],
    };
    (captype, variants)
}
