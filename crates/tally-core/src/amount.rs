//! Free-form amount normalization
//!
//! Turns user-entered amount text ("12,50 EUR", "€ 8", "1 234,56") into
//! a finite number, or `None` when no numeric value can be recovered.
//! Pure text processing, no I/O.

/// Normalize free-form amount text
///
/// Pipeline, in order: lowercase; drop the whole-word currency tokens
/// `euro`, `euros`, `eur`; drop every `€` sign and all whitespace; turn
/// decimal commas into periods; drop any remaining ASCII letters; then
/// read the longest leading numeric prefix of what is left.
///
/// The prefix rule is an explicit policy, not full-string validation:
/// trailing garbage after a valid number is ignored, so "12-34"
/// normalizes to 12 and "7.5.1" to 7.5.
pub fn normalize_amount(raw: Option<&str>) -> Option<f64> {
    static CURRENCY_TOKENS: once_cell::sync::OnceCell<regex::Regex> =
        once_cell::sync::OnceCell::new();
    let currency_tokens =
        CURRENCY_TOKENS.get_or_init(|| regex::Regex::new(r"\b(?:euros?|eur)\b").unwrap());

    let raw = raw?;
    let mut text = raw.to_lowercase();
    text = currency_tokens.replace_all(&text, "").into_owned();
    text.retain(|c| c != '€' && !c.is_whitespace());
    text = text.replace(',', ".");
    text.retain(|c| !c.is_ascii_alphabetic());

    parse_numeric_prefix(&text)
}

/// Parse the longest leading numeric prefix: an optional sign, digits,
/// and at most one decimal point. `None` when the prefix holds no digit
/// or the parsed value is not finite.
fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let mut prefix = String::new();
    let mut chars = text.chars().peekable();

    if let Some(&c) = chars.peek() {
        if c == '+' || c == '-' {
            prefix.push(c);
            chars.next();
        }
    }

    let mut saw_digit = false;
    let mut saw_dot = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            saw_digit = true;
        } else if c == '.' && !saw_dot {
            saw_dot = true;
        } else {
            break;
        }
        prefix.push(c);
        chars.next();
    }

    if !saw_digit {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}
