//! Anchor slugification.
//!
//! Turns heading text into a fragment identifier according to
//! `[build.slug]`. See [`SlugMode`] for the available modes.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{SlugCase, SlugConfig, SlugMode};

/// Characters that break fragment links or HTML attributes.
const UNSAFE_CHARS: &[char] = &[
    '<', '>', '"', '\'', '`', '#', '?', '%', '&', '/', '\\', '{', '}', '[', ']', '|', '^', '~',
];

/// Runs of separators left behind by removed characters.
static REPEATED_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]{2,}").unwrap());

/// Slugify heading text for use as an `id`.
///
/// # Examples
/// ```ignore
/// // mode = full, separator = dash, case = lower
/// assert_eq!(slugify_fragment("Café Setup!", &config), "cafe-setup");
/// ```
pub fn slugify_fragment(text: &str, config: &SlugConfig) -> String {
    let text = text.trim();
    let sep = config.separator.as_char();

    let slug = match config.fragment {
        SlugMode::No => return apply_case(text, &config.case),
        SlugMode::Full => {
            let ascii = deunicode::deunicode(text);
            ascii
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { sep })
                .collect::<String>()
        }
        SlugMode::Ascii => replace_unsafe(&deunicode::deunicode(text), sep),
        SlugMode::Safe => replace_unsafe(text, sep),
    };

    let slug = REPEATED_SEPARATORS.replace_all(&slug, sep.to_string());
    let slug = slug.trim_matches(|c| c == '-' || c == '_');
    apply_case(slug, &config.case)
}

/// Whitespace becomes the separator, unsafe characters are dropped.
fn replace_unsafe(text: &str, sep: char) -> String {
    text.chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { sep } else { c })
        .collect()
}

fn apply_case(text: &str, case: &SlugCase) -> String {
    match case {
        SlugCase::Lower => text.to_lowercase(),
        SlugCase::Upper => text.to_uppercase(),
        SlugCase::Preserve => text.to_string(),
        SlugCase::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if at_word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                at_word_start = !c.is_alphanumeric();
            }
            out
        }
    }
}
