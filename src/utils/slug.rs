use regex::Regex;
use std::sync::OnceLock;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").unwrap())
}

/// Letters and digits become their closest ASCII spelling ("é" -> "e");
/// other non-ASCII characters are dropped.
fn to_ascii(value: &str) -> String {
    let mut ascii = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii() {
            ascii.push(ch);
        } else if ch.is_alphanumeric() {
            if let Some(spelled) = deunicode::deunicode_char(ch) {
                ascii.push_str(spelled);
            }
        }
    }
    ascii
}

/// Turns a display name into a URL slug: "Pro Plan (2024)" -> "pro-plan-2024".
pub fn slugify(value: &str) -> String {
    let ascii = to_ascii(value);
    let lowered = ascii.to_lowercase();
    let cleaned = disallowed_chars().replace_all(&lowered, "");
    let joined = separators().replace_all(&cleaned, "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}
