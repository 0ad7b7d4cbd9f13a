//! NAICS sector lookup tables: descriptions and chart colours.

/// Colour used for industries without an entry in [`INDUSTRY_COLORS`].
pub const FALLBACK_COLOR: &str = "#666666";

/// Label shown when a code has no long description.
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

/// Short sector names used in chart legends and web labels.
const SHORT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("11", "Agriculture"),
    ("21", "Mining"),
    ("22", "Utilities"),
    ("23", "Construction"),
    ("31-33", "Manufacturing"),
    ("42", "Wholesale Trade"),
    ("44-45", "Retail Trade"),
    ("48-49", "Transportation"),
    ("51", "Information"),
    ("52", "Finance"),
    ("53", "Real Estate"),
    ("54", "Professional Services"),
    ("55", "Management"),
    ("56", "Admin Services"),
    ("61", "Education"),
    ("62", "Healthcare"),
    ("71", "Entertainment"),
    ("72", "Accommodation"),
    ("81", "Other Services"),
    ("92", "Public Admin"),
];

/// Official sector titles used in summary tables.
const LONG_DESCRIPTIONS: &[(&str, &str)] = &[
    ("11", "Agriculture, Forestry, Fishing and Hunting"),
    ("21", "Mining, Quarrying, and Oil and Gas Extraction"),
    ("22", "Utilities"),
    ("23", "Construction"),
    ("31-33", "Manufacturing"),
    ("42", "Wholesale Trade"),
    ("44-45", "Retail Trade"),
    ("48-49", "Transportation and Warehousing"),
    ("51", "Information"),
    ("52", "Finance and Insurance"),
    ("53", "Real Estate and Rental and Leasing"),
    ("54", "Professional, Scientific, and Technical Services"),
    ("55", "Management of Companies and Enterprises"),
    ("56", "Administrative and Support Services"),
    ("61", "Educational Services"),
    ("62", "Health Care and Social Assistance"),
    ("71", "Arts, Entertainment, and Recreation"),
    ("72", "Accommodation and Food Services"),
    ("81", "Other Services"),
    ("92", "Public Administration"),
];

/// Distinct palette, one colour per sector.
const INDUSTRY_COLORS: &[(&str, &str)] = &[
    ("54", "#2E86AB"),
    ("51", "#A23B72"),
    ("52", "#F18F01"),
    ("61", "#C73E1D"),
    ("71", "#6A0572"),
    ("56", "#95C623"),
    ("81", "#5C8001"),
    ("48-49", "#7B2D8E"),
    ("44-45", "#00A6A6"),
    ("62", "#E36397"),
    ("31-33", "#8B4513"),
    ("92", "#4A7C59"),
    ("11", "#DAA520"),
    ("72", "#FF6B6B"),
    ("53", "#20B2AA"),
    ("22", "#4169E1"),
    ("23", "#CD853F"),
    ("42", "#708090"),
    ("21", "#2F4F4F"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
}

/// Short name for `code`, e.g. `"54"` → `"Professional Services"`.
pub fn short_description(code: &str) -> Option<&'static str> {
    lookup(SHORT_DESCRIPTIONS, code)
}

/// Official title for `code`, or `"Unknown"`.
pub fn long_description(code: &str) -> &'static str {
    lookup(LONG_DESCRIPTIONS, code).unwrap_or(UNKNOWN_INDUSTRY)
}

/// Hex colour for `code`, or [`FALLBACK_COLOR`].
pub fn color(code: &str) -> &'static str {
    lookup(INDUSTRY_COLORS, code).unwrap_or(FALLBACK_COLOR)
}

/// Legend label `"<code>: <short name>"`; the short name falls back to the code.
pub fn industry_label(code: &str) -> String {
    format!("{}: {}", code, short_description(code).unwrap_or(code))
}

/// Parse `"#RRGGBB"` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
