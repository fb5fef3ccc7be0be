//! Price normalization, discount derivation and display formatting.
//!
//! The catalog transmits prices as JSON numbers, as formatted strings such as
//! `"1,234.50"`, or as `null`. Everything downstream works on a plain `f64`
//! produced by [`normalize_price`], which never fails: garbage becomes `0.0`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// VAT percentage applied to a retail price when the product does not carry one.
pub const DEFAULT_VAT_PERCENT: f64 = 5.0;

/// Leading numeric prefix, matching what a lenient float parser accepts
/// once separators and currency symbols are gone.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").expect("valid numeric prefix regex")
});

/// A price exactly as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// `null`, an absent field, or a value of any other JSON type.
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for RawPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(f64),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => RawPrice::Number(n),
            Wire::Text(s) => RawPrice::Text(s),
            Wire::Other(_) => RawPrice::Missing,
        })
    }
}

impl RawPrice {
    /// `true` for `null`, absent and blank-string values.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        match self {
            RawPrice::Missing => true,
            RawPrice::Number(_) => false,
            RawPrice::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_owned())
    }
}

impl From<String> for RawPrice {
    fn from(value: String) -> Self {
        RawPrice::Text(value)
    }
}

impl<T: Into<RawPrice>> From<Option<T>> for RawPrice {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawPrice::Missing, Into::into)
    }
}

/// Coerces any backend price representation into a finite number.
///
/// - numbers pass through; `NaN` and infinities become `0.0`
/// - strings lose every character except digits, `.` and `-`, then the
///   leading numeric prefix is parsed (`"1,234.50"` → `1234.5`)
/// - `null`, empty and unparsable input become `0.0`
#[must_use]
pub fn normalize_price(input: &RawPrice) -> f64 {
    let value = match input {
        RawPrice::Missing => return 0.0,
        RawPrice::Number(n) => *n,
        RawPrice::Text(s) => parse_price_text(s),
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn parse_price_text(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    NUMERIC_PREFIX
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Discount display data derived from a product's pricing fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discount {
    /// Driven only by `discount_percent > 0`, never by comparing prices.
    pub has_discount: bool,
    pub original_price: f64,
    pub discount_percent: f64,
}

/// Derives the strike-through price shown next to `current_price`.
///
/// With a positive `retail_price` the original price is the retail price
/// plus VAT; otherwise it equals the current price.
#[must_use]
pub fn compute_discount(
    current_price: f64,
    retail_price: f64,
    vat_percent: f64,
    discount_percent: f64,
) -> Discount {
    let original_price = if retail_price > 0.0 {
        retail_price * (1.0 + vat_percent / 100.0)
    } else {
        current_price
    };

    Discount {
        has_discount: discount_percent > 0.0,
        original_price,
        discount_percent,
    }
}

/// Renders a price with comma thousands grouping and no decimal places.
///
/// `0`, `NaN` and infinities render as `"0"`.
#[must_use]
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }

    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    if rounded == 0 {
        return "0".to_owned();
    }

    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
