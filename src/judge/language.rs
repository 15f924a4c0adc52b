//! Language name <-> Judge0 language id table

use crate::constants::languages;

/// Supported languages and their Judge0 ids
const LANGUAGES: [(&str, i32); 4] = [
    (languages::PYTHON, 71),
    (languages::JAVA, 62),
    (languages::JAVASCRIPT, 63),
    (languages::TYPESCRIPT, 74),
];

/// Judge0 id for a language name, matched case-insensitively
pub fn language_id_for(name: &str) -> Option<i32> {
    let name = name.trim();
    LANGUAGES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, id)| *id)
}

/// Language name for a Judge0 id, or `"UNKNOWN"`
pub fn language_name_for(id: i32) -> &'static str {
    LANGUAGES
        .iter()
        .find(|(_, known)| *known == id)
        .map(|(name, _)| *name)
        .unwrap_or(languages::UNKNOWN)
}

/// All supported language names
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(name, _)| *name)
}
