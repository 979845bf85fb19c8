//! Positional template interpolation with locale-aware number rendering.

use super::arg::MessageArg;
use super::locale::Locale;

/// Interpolates `{0}`, `{1}`, … in `template` with `args`.
///
/// Apostrophes follow the `MessageFormat` convention: `''` is a literal quote
/// and text between single quotes is copied verbatim, braces included.
/// Placeholders without a matching argument are left as written.
///
/// # Example
///
/// ```rust
/// use kova::{format_template, Locale, MessageArg};
///
/// let text = format_template(
///     "must be at least {0}",
///     &[MessageArg::Int(1500)],
///     &Locale::english(),
/// );
/// assert_eq!(text, "must be at least 1,500");
/// ```
pub fn format_template(template: &str, args: &[MessageArg], locale: &Locale) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let mut spec = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(next);
                }

                let arg = spec
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index));
                match (closed, arg) {
                    (true, Some(arg)) => out.push_str(&render_arg(arg, locale)),
                    (true, None) => {
                        out.push('{');
                        out.push_str(&spec);
                        out.push('}');
                    }
                    (false, _) => {
                        out.push('{');
                        out.push_str(&spec);
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Renders a single argument as it appears inside a message.
pub fn render_arg(arg: &MessageArg, locale: &Locale) -> String {
    match arg {
        MessageArg::Int(value) => {
            let digits = group_digits(&value.unsigned_abs().to_string(), locale);
            if *value < 0 {
                format!("-{}", digits)
            } else {
                digits
            }
        }
        MessageArg::UInt(value) => group_digits(&value.to_string(), locale),
        MessageArg::Float(value) => render_float(*value, locale),
        MessageArg::Text(text) => text.clone(),
        MessageArg::Bool(value) => value.to_string(),
        MessageArg::Messages(messages) => bracketed(messages.iter().map(|m| m.text.clone())),
        MessageArg::List(items) => bracketed(items.iter().map(|item| render_arg(item, locale))),
    }
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    format!("[{}]", items.join(", "))
}

/// Grouping separator and decimal separator for a locale.
fn separators(locale: &Locale) -> (&'static str, char) {
    match locale.language() {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" => (".", ','),
        "fr" => ("\u{202f}", ','),
        "ru" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "uk" | "hu" => ("\u{a0}", ','),
        _ => (",", '.'),
    }
}

fn group_digits(digits: &str, locale: &Locale) -> String {
    let (group, _) = separators(locale);
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * group.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(group);
        }
        out.push(c);
    }
    out
}

fn render_float(value: f64, locale: &Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (trimmed, None),
    };

    let (_, decimal) = separators(locale);
    let mut out = String::new();
    if value < 0.0 && trimmed != "0" {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale));
    if let Some(frac_part) = frac_part {
        out.push(decimal);
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::english()
    }

    #[test]
    fn test_positional_placeholders() {
        let args = [MessageArg::from("a"), MessageArg::from("b")];
        assert_eq!(format_template("{1} then {0}", &args, &en()), "b then a");
    }

    #[test]
    fn test_missing_argument_is_left_verbatim() {
        assert_eq!(format_template("value {0} {3}", &[MessageArg::Int(1)], &en()), "value 1 {3}");
        assert_eq!(format_template("open {0", &[MessageArg::Int(1)], &en()), "open {0");
    }

    #[test]
    fn test_apostrophes() {
        assert_eq!(format_template("it''s {0}", &[MessageArg::Int(2)], &en()), "it's 2");
        assert_eq!(format_template("'{0}' is {0}", &[MessageArg::Int(2)], &en()), "{0} is 2");
    }

    #[test]
    fn test_integer_grouping_per_locale() {
        let arg = MessageArg::Int(-1234567);
        assert_eq!(render_arg(&arg, &en()), "-1,234,567");
        assert_eq!(render_arg(&arg, &Locale::new("de")), "-1.234.567");
        assert_eq!(render_arg(&MessageArg::UInt(999), &en()), "999");
        assert_eq!(render_arg(&MessageArg::UInt(1000), &Locale::new("fr")), "1\u{202f}000");
    }

    #[test]
    fn test_float_rendering() {
        assert_eq!(render_arg(&MessageArg::Float(1.5), &en()), "1.5");
        assert_eq!(render_arg(&MessageArg::Float(1234.56789), &en()), "1,234.568");
        assert_eq!(render_arg(&MessageArg::Float(2.0), &en()), "2");
        assert_eq!(render_arg(&MessageArg::Float(-0.5), &Locale::new("de")), "-0,5");
        assert_eq!(render_arg(&MessageArg::Float(-0.0001), &en()), "0");
    }

    #[test]
    fn test_list_rendering() {
        let arg = MessageArg::List(vec![MessageArg::Int(1), MessageArg::from("x")]);
        assert_eq!(render_arg(&arg, &en()), "[1, x]");
        assert_eq!(render_arg(&MessageArg::Messages(Vec::new()), &en()), "[]");
    }
}
