//! Friendly price strings for display.
//!
//! Amounts arrive in the currency's minor unit (cents for USD), the way the
//! billing provider stores them.

const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "bif", "clp", "djf", "gnf", "jpy", "kmf", "krw", "mga", "pyg", "rwf", "ugx", "vnd", "vuv",
    "xaf", "xof", "xpf",
];

pub fn is_zero_decimal(currency: &str) -> bool {
    ZERO_DECIMAL_CURRENCIES.contains(&currency.to_ascii_lowercase().as_str())
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_lowercase().as_str() {
        "usd" => Some("$"),
        "eur" => Some("€"),
        "gbp" => Some("£"),
        "jpy" => Some("¥"),
        "inr" => Some("₹"),
        "krw" => Some("₩"),
        "aud" => Some("A$"),
        "cad" => Some("CA$"),
        "nzd" => Some("NZ$"),
        "brl" => Some("R$"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_major_units(unit_amount: i64, currency: &str) -> String {
    let sign = if unit_amount < 0 { "-" } else { "" };
    let abs = unit_amount.unsigned_abs();

    if is_zero_decimal(currency) {
        format!("{}{}", sign, group_thousands(&abs.to_string()))
    } else {
        format!(
            "{}{}.{:02}",
            sign,
            group_thousands(&(abs / 100).to_string()),
            abs % 100
        )
    }
}

/// `$1,200.00`, `¥500`, or `CHF 10.00` for currencies without a known symbol.
pub fn friendly_currency_amount(unit_amount: Option<i64>, currency: &str) -> String {
    let Some(amount) = unit_amount else {
        return "Unknown".to_string();
    };

    let number = format_major_units(amount, currency);
    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}", symbol, number),
        None => format!("{} {}", currency.to_ascii_uppercase(), number),
    }
}

/// `$10.00 USD/month`, or `$30.00 USD every 3 months` for multi-period prices.
pub fn human_readable_price(
    unit_amount: Option<i64>,
    currency: &str,
    recurrence: Option<(&str, u32)>,
) -> String {
    let amount = match currency_symbol(currency) {
        Some(_) => format!(
            "{} {}",
            friendly_currency_amount(unit_amount, currency),
            currency.to_ascii_uppercase()
        ),
        None => friendly_currency_amount(unit_amount, currency),
    };

    match recurrence {
        Some((interval, 1)) => format!("{}/{}", amount, interval),
        Some((interval, count)) => format!("{} every {} {}s", amount, count, interval),
        None => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_amount_uses_symbol_and_two_decimals() {
        assert_eq!(friendly_currency_amount(Some(10000), "usd"), "$100.00");
        assert_eq!(friendly_currency_amount(Some(1999), "EUR"), "€19.99");
        assert_eq!(friendly_currency_amount(Some(120000), "gbp"), "£1,200.00");
    }

    #[test]
    fn test_friendly_amount_zero_decimal_currency() {
        assert_eq!(friendly_currency_amount(Some(1500), "jpy"), "¥1,500");
    }

    #[test]
    fn test_friendly_amount_unknown_currency_and_missing_amount() {
        assert_eq!(friendly_currency_amount(Some(1000), "chf"), "CHF 10.00");
        assert_eq!(friendly_currency_amount(None, "usd"), "Unknown");
    }

    #[test]
    fn test_human_readable_price() {
        assert_eq!(
            human_readable_price(Some(1000), "usd", Some(("month", 1))),
            "$10.00 USD/month"
        );
        assert_eq!(
            human_readable_price(Some(3000), "usd", Some(("month", 3))),
            "$30.00 USD every 3 months"
        );
        assert_eq!(human_readable_price(Some(500), "usd", None), "$5.00 USD");
    }
}
