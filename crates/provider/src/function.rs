pub const FORMAT_RANGE_NAME: &str = "format_range";

/// Sheet-qualified A1 range: `'<title>'!<range>`.
///
/// Single quotes inside the title are doubled, which is how A1 notation
/// escapes them; titles without quotes come out unchanged.
pub fn format_range(title: &str, range: &str) -> String {
    format!("'{}'!{}", title.replace('\'', "''"), range)
}
