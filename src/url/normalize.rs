use crate::url::{PageId, Site};
use crate::UrlError;
use percent_encoding::percent_decode_str;

/// Normalizes a raw link into a canonical [`PageId`]
///
/// # Normalization Steps
///
/// 1. Reject empty, fragment-only, and non-navigational links
///    (`javascript:`, `mailto:`, `tel:`, `data:`)
/// 2. Resolve the reference against the site's base URL
/// 3. Reject links whose host differs from the site's (off-site)
/// 4. Percent-decode the resolved path and drop query/fragment,
///    yielding the canonical in-site path
///
/// The function is idempotent: normalizing an already-normalized path
/// returns the same `PageId`.
///
/// # Arguments
///
/// * `site` - The site the link was found on
/// * `raw` - The raw href value, relative or absolute, possibly encoded
///
/// # Returns
///
/// * `Ok(PageId)` - Canonical identifier of the linked page
/// * `Err(UrlError)` - Malformed or off-site link; callers treat this
///   as the absence of a link, never as a fatal condition
///
/// # Examples
///
/// ```
/// use linktrace::url::{normalize, Site};
/// use url::Url;
///
/// let site = Site::new(
///     Url::parse("https://ru.wikipedia.org/").unwrap(),
///     "div.mw-body-content p".to_string(),
///     vec!["/wiki/".to_string()],
/// );
/// let id = normalize(&site, "/wiki/%D0%9C%D0%BE%D0%BD%D0%B0%D0%BA%D0%BE").unwrap();
/// assert_eq!(id.as_str(), "/wiki/Монако");
/// ```
pub fn normalize(site: &Site, raw: &str) -> Result<PageId, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::Malformed("empty link".to_string()));
    }

    // Fragment-only references point back at the same page
    if raw.starts_with('#') {
        return Err(UrlError::Malformed(format!("fragment-only link: {}", raw)));
    }

    // Non-navigational schemes
    if raw.starts_with("javascript:")
        || raw.starts_with("mailto:")
        || raw.starts_with("tel:")
        || raw.starts_with("data:")
    {
        return Err(UrlError::Malformed(format!(
            "non-navigational scheme: {}",
            raw
        )));
    }

    let resolved = site
        .base()
        .join(raw)
        .map_err(|e| UrlError::Malformed(format!("{}: {}", raw, e)))?;

    if resolved.host_str() != site.base().host_str() {
        return Err(UrlError::OffSite(raw.to_string()));
    }

    let decoded = percent_decode_str(resolved.path())
        .decode_utf8()
        .map_err(|e| UrlError::Malformed(format!("{}: {}", raw, e)))?;

    Ok(PageId::new(decoded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_site() -> Site {
        Site::new(
            Url::parse("https://example.com/").unwrap(),
            "div.content p".to_string(),
            vec!["/wiki/".to_string()],
        )
    }

    #[test]
    fn test_relative_path() {
        let id = normalize(&test_site(), "/wiki/Page").unwrap();
        assert_eq!(id.as_str(), "/wiki/Page");
    }

    #[test]
    fn test_absolute_in_site_url() {
        let id = normalize(&test_site(), "https://example.com/wiki/Page").unwrap();
        assert_eq!(id.as_str(), "/wiki/Page");
    }

    #[test]
    fn test_percent_decoding() {
        let id = normalize(&test_site(), "/wiki/Foo%20Bar").unwrap();
        assert_eq!(id.as_str(), "/wiki/Foo Bar");
    }

    #[test]
    fn test_cyrillic_percent_decoding() {
        let id = normalize(
            &test_site(),
            "/wiki/%D0%9C%D0%BE%D0%BD%D0%B0%D0%BA%D0%BE",
        )
        .unwrap();
        assert_eq!(id.as_str(), "/wiki/Монако");
    }

    #[test]
    fn test_fragment_stripped() {
        let id = normalize(&test_site(), "/wiki/Page#History").unwrap();
        assert_eq!(id.as_str(), "/wiki/Page");
    }

    #[test]
    fn test_query_stripped() {
        let id = normalize(&test_site(), "/wiki/Page?action=edit").unwrap();
        assert_eq!(id.as_str(), "/wiki/Page");
    }

    #[test]
    fn test_idempotence() {
        let site = test_site();
        let fixtures = [
            "/wiki/Page",
            "/wiki/Foo%20Bar",
            "/wiki/%D0%9C%D0%BE%D0%BD%D0%B0%D0%BA%D0%BE",
            "https://example.com/wiki/Deep/Path",
            "/wiki/Page#section",
        ];
        for raw in fixtures {
            let once = normalize(&site, raw).unwrap();
            let twice = normalize(&site, once.as_str()).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_off_site_rejected() {
        let result = normalize(&test_site(), "https://other.com/wiki/Page");
        assert!(matches!(result.unwrap_err(), UrlError::OffSite(_)));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            normalize(&test_site(), "  ").unwrap_err(),
            UrlError::Malformed(_)
        ));
    }

    #[test]
    fn test_fragment_only_rejected() {
        assert!(normalize(&test_site(), "#cite_note-1").is_err());
    }

    #[test]
    fn test_special_schemes_rejected() {
        for raw in ["javascript:void(0)", "mailto:a@b.com", "tel:+123", "data:text/plain,x"] {
            assert!(normalize(&test_site(), raw).is_err(), "accepted {}", raw);
        }
    }

    #[test]
    fn test_relative_reference_resolved_against_base() {
        let site = Site::new(
            Url::parse("https://example.com/wiki/Current").unwrap(),
            "div.content p".to_string(),
            vec!["/wiki/".to_string()],
        );
        let id = normalize(&site, "Other").unwrap();
        assert_eq!(id.as_str(), "/wiki/Other");
    }
}
