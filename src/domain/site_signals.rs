use crate::domain::prospect::SocialLinks;

/// What a single fetch of a venue's website told us. Computed fresh on every
/// search; absent entirely when the venue has no website.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteSignals {
    pub uses_https: bool,
    pub is_responsive: bool,
    pub has_contact_form: bool,
    pub has_logo: bool,
    pub email: Option<String>,
    pub social: SocialLinks,
}

impl SiteSignals {
    /// Fallback when the site could not be fetched or must not be fetched:
    /// every derived boolean is false except a best-effort HTTPS flag taken
    /// from the URL itself.
    pub fn degraded(url: &str) -> Self {
        SiteSignals {
            uses_https: url.starts_with("https://"),
            ..SiteSignals::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SiteSignals;

    #[test]
    fn degraded_signals_keep_scheme_information() {
        assert!(SiteSignals::degraded("https://shop.fr").uses_https);
        assert!(!SiteSignals::degraded("http://shop.fr").uses_https);
        assert!(!SiteSignals::degraded("shop.fr").uses_https);
    }
}
