/// Production site origin prefixed onto site-relative hrefs
pub const DEFAULT_ORIGIN: &str = "https://www.hrs.com";

/// Production home page seed URL
pub const DEFAULT_HOME_URL: &str = "https://www.hrs.com/en/";

/// Static country-list seed covering the European region
///
/// This URL is stable, so the European region is seeded directly instead
/// of being discovered through the home page's worldwide links.
pub const DEFAULT_EUROPE_LIST_URL: &str = "https://www.hrs.com/en/hotel/europe/cl-k-1";

/// Converts a raw href to an absolute site URL
///
/// A site-relative href (leading `/`) is prefixed with the origin; anything
/// else is returned unchanged. Never fails; an empty string maps to itself.
/// Callers guard against anchors with no href before invoking.
pub fn to_absolute(origin: &str, raw: &str) -> String {
    if raw.starts_with('/') {
        format!("{}{}", origin, raw)
    } else {
        raw.to_string()
    }
}
