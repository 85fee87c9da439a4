//! Display-value fallbacks.
//!
//! Every string that reaches the front end is either a real value or one of
//! the placeholders defined here.

/// Placeholder for missing codes, registrations, squawks and callsigns.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder operator for aircraft without an airline.
pub const PRIVATE_OWNER: &str = "private owner";

/// Separator between origin and destination in a route.
pub const ROUTE_SEPARATOR: &str = "->";

/// Returns `value` unless it is empty, in which case `fallback`.
#[inline]
pub fn first_non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Returns the first non-empty candidate, or `fallback` if all are empty.
///
/// ```
/// use reradar::fallback::first_non_empty_of;
///
/// assert_eq!(first_non_empty_of(["", "A320", "A20N"], "N/A"), "A320");
/// assert_eq!(first_non_empty_of(["", ""], "N/A"), "N/A");
/// ```
pub fn first_non_empty_of<'a, I>(candidates: I, fallback: &'a str) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .find(|c| !c.is_empty())
        .unwrap_or(fallback)
}

/// Formats `ORIGIN->DESTINATION`, substituting `N/A` for missing ends.
pub fn route(origin: &str, destination: &str) -> String {
    format!(
        "{}{}{}",
        first_non_empty(origin, NOT_AVAILABLE),
        ROUTE_SEPARATOR,
        first_non_empty(destination, NOT_AVAILABLE)
    )
}
