//! Free-text color names to display swatches.
//!
//! Product feeds carry colors as loose text: `"Walnut"`, `"'Red'"`,
//! `"\"\"Grey\"\""` after a CSV round trip, or `"Black, Oak"` when a product
//! ships in several finishes. [`resolve_color`] maps one name to a swatch and
//! [`split_colors`] handles the comma-joined form.

use serde::{Deserialize, Serialize};

/// Swatch used for names the registry does not know.
pub const FALLBACK_HEX: &str = "#000000";

/// Display name → hex swatch. Lookups are case-insensitive.
const COLOR_TABLE: &[(&str, &str)] = &[
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Off White", "#FAF9F6"),
    ("Ivory", "#FFFFF0"),
    ("Cream", "#FFFDD0"),
    ("Beige", "#F5F5DC"),
    ("Linen", "#FAF0E6"),
    ("Sand", "#C2B280"),
    ("Taupe", "#483C32"),
    ("Grey", "#808080"),
    ("Gray", "#808080"),
    ("Light Grey", "#D3D3D3"),
    ("Light Gray", "#D3D3D3"),
    ("Dark Grey", "#A9A9A9"),
    ("Dark Gray", "#A9A9A9"),
    ("Charcoal", "#36454F"),
    ("Silver", "#C0C0C0"),
    ("Red", "#FF0000"),
    ("Burgundy", "#800020"),
    ("Maroon", "#800000"),
    ("Rust", "#B7410E"),
    ("Terracotta", "#E2725B"),
    ("Orange", "#FFA500"),
    ("Mustard", "#FFDB58"),
    ("Yellow", "#FFFF00"),
    ("Gold", "#FFD700"),
    ("Green", "#008000"),
    ("Olive", "#808000"),
    ("Sage", "#9CAF88"),
    ("Emerald", "#50C878"),
    ("Teal", "#008080"),
    ("Turquoise", "#40E0D0"),
    ("Blue", "#0000FF"),
    ("Light Blue", "#ADD8E6"),
    ("Navy", "#000080"),
    ("Navy Blue", "#000080"),
    ("Purple", "#800080"),
    ("Lavender", "#E6E6FA"),
    ("Pink", "#FFC0CB"),
    ("Blush", "#DE5D83"),
    ("Brown", "#A52A2A"),
    ("Dark Brown", "#654321"),
    ("Light Brown", "#B5651D"),
    ("Camel", "#C19A6B"),
    ("Natural", "#E5D3B3"),
    ("Walnut", "#773F1A"),
    ("Oak", "#C19A6B"),
    ("Natural Oak", "#D8B98A"),
    ("Teak", "#B1793E"),
    ("Mahogany", "#C04000"),
    ("Cherry", "#8B1A1A"),
    ("Espresso", "#4B3621"),
    ("Ebony", "#555D50"),
    ("Maple", "#D9B38C"),
    ("Pine", "#E3C08D"),
    ("Birch", "#F1E1C6"),
    ("Ash", "#B2BEB5"),
    ("Rattan", "#C8A165"),
    ("Brass", "#B5A642"),
    ("Copper", "#B87333"),
    ("Bronze", "#CD7F32"),
    ("Chrome", "#DBE4EB"),
    ("Marble", "#F2F0EB"),
];

/// A resolved color: the name shown to the shopper and its swatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    pub hex: String,
}

impl Color {
    /// The color attached to a line item when the product names none.
    #[must_use]
    pub fn unspecified() -> Self {
        Self {
            name: "Default".to_owned(),
            hex: FALLBACK_HEX.to_owned(),
        }
    }
}

/// Resolves one free-text color name to a swatch.
///
/// Surrounding quotes are stripped twice to undo one level of nesting. Known
/// names come back with the registry's capitalization; unknown names keep the
/// cleaned input and get [`FALLBACK_HEX`].
#[must_use]
pub fn resolve_color(raw_name: &str) -> Color {
    let cleaned = strip_outer_quotes(strip_outer_quotes(raw_name));

    COLOR_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(cleaned))
        .map_or_else(
            || Color {
                name: cleaned.to_owned(),
                hex: FALLBACK_HEX.to_owned(),
            },
            |(name, hex)| Color {
                name: (*name).to_owned(),
                hex: (*hex).to_owned(),
            },
        )
}

/// Splits a comma-joined color field and resolves every non-empty part.
#[must_use]
pub fn split_colors(raw: &str) -> Vec<Color> {
    raw.split(',')
        .map(|part| strip_outer_quotes(strip_outer_quotes(part)))
        .filter(|part| !part.is_empty())
        .map(resolve_color)
        .collect()
}

fn strip_outer_quotes(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    let s = s.strip_suffix(['"', '\'']).unwrap_or(s);
    s.trim()
}

#[cfg(test)]
#[path = "colors_test.rs"]
mod tests;
