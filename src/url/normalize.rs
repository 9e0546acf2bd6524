use url::Url;

/// Schemes accepted as already explicit
const EXPLICIT_SCHEMES: &[&str] = &["http://", "https://"];

/// Makes a harvested URL fetchable by giving it an explicit scheme
///
/// URLs that already start with `http://` or `https://` are returned unchanged;
/// everything else is assumed to be an HTTPS address.
///
/// # Examples
///
/// ```
/// use bracket_harvest::url::normalize_scheme;
///
/// assert_eq!(normalize_scheme("www.google.com"), "https://www.google.com");
/// assert_eq!(normalize_scheme("http://example.com"), "http://example.com");
/// ```
pub fn normalize_scheme(url: &str) -> String {
    if EXPLICIT_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Normalizes the scheme and parses the result into a [`Url`]
///
/// # Returns
///
/// * `Ok(Url)` - The URL that should be requested
/// * `Err(url::ParseError)` - The harvested text is not a valid URL even with a scheme
pub fn to_request_url(url: &str) -> Result<Url, url::ParseError> {
    Url::parse(&normalize_scheme(url))
}
