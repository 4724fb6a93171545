//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 assets)
/// - `plural_s(1)` -> `""` (1 asset)
/// - `plural_s(5)` -> `"s"` (5 assets)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "asset")` -> `"0 assets"`
/// - `plural_count(1, "asset")` -> `"1 asset"`
/// - `plural_count(5, "asset")` -> `"5 assets"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
