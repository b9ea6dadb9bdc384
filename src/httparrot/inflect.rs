//! Naming helpers for blueprint classes and collection attributes.
//!
//! - [`camelize`] turns a blueprint name into the display class suffix
//!   (`user_profile` becomes `UserProfile`).
//! - [`pluralize`] names the attribute created for a has-many relation
//!   (`comment` becomes `comments`).
//!
//! Only the final `_`-separated segment of a word is inflected, so
//! `blog_post` pluralizes to `blog_posts`.

/// Words that have no distinct plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "jeans",
    "money",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Singular/plural pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("louse", "lice"),
    ("man", "men"),
    ("mouse", "mice"),
    ("move", "moves"),
    ("ox", "oxen"),
    ("person", "people"),
    ("sex", "sexes"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

/// Converts an underscored name to CamelCase. Path separators become `::`.
///
/// # Examples
/// ```
/// use httparrot::inflect::camelize;
///
/// assert_eq!(camelize("user"), "User");
/// assert_eq!(camelize("user_profile"), "UserProfile");
/// assert_eq!(camelize("admin/user"), "Admin::User");
/// assert_eq!(camelize("HTTPResponse"), "HTTPResponse");
/// ```
pub fn camelize(name: &str) -> String {
    name.split('/')
        .map(|segment| {
            segment
                .split('_')
                .filter(|part| !part.is_empty())
                .map(capitalize)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("::")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the plural form of an English noun.
///
/// # Examples
/// ```
/// use httparrot::inflect::pluralize;
///
/// assert_eq!(pluralize("comment"), "comments");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("address"), "addresses");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("blog_post"), "blog_posts");
/// assert_eq!(pluralize("comments"), "comments");
/// ```
pub fn pluralize(word: &str) -> String {
    let (prefix, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };
    format!("{}{}", prefix, pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        if lower == *singular {
            return match_case(word, plural);
        }
        if lower == *plural {
            return word.to_string();
        }
    }

    // Suffixes are ASCII, so byte offsets into `lower` are valid for `word`.
    let stem = |suffix_len: usize| &word[..word.len() - suffix_len];

    if lower.ends_with("quiz") {
        return format!("{}zes", word);
    }
    if ["matrix", "vertex", "index"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}ices", stem(2));
    }
    if lower.ends_with("sis") {
        return format!("{}ses", stem(3));
    }
    if ["ss", "x", "ch", "sh", "z", "us", "alias"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return format!("{}es", word);
    }
    if lower.ends_with('s') {
        return word.to_string();
    }
    if lower.ends_with('y') && !ends_with_vowel_before(&lower, 1) {
        return format!("{}ies", stem(1));
    }
    if lower.ends_with("fe") && !lower.ends_with("ffe") {
        return format!("{}ves", stem(2));
    }
    if lower.ends_with("lf") || lower.ends_with("rf") {
        return format!("{}ves", stem(1));
    }
    if lower.ends_with("tomato") || lower.ends_with("buffalo") {
        return format!("{}es", word);
    }
    if lower.ends_with("tum") || lower.ends_with("ium") {
        return format!("{}a", stem(2));
    }

    format!("{}s", word)
}

/// True when the character `offset` bytes before the end is a vowel.
/// `qu` counts as a consonant cluster (`soliloquy` -> `soliloquies`).
fn ends_with_vowel_before(lower: &str, offset: usize) -> bool {
    let bytes = lower.as_bytes();
    if bytes.len() <= offset {
        return false;
    }
    let idx = bytes.len() - offset - 1;
    let is_vowel = matches!(bytes[idx], b'a' | b'e' | b'i' | b'o' | b'u');
    let after_q = bytes[idx] == b'u' && idx > 0 && bytes[idx - 1] == b'q';
    is_vowel && !after_q
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}
