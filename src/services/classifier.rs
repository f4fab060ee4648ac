use crate::domain::{prospect::ProfileType, site_signals::SiteSignals};

use super::site_inspector::is_social_platform;

/// Profile-specific decision table, evaluated top to bottom; the first
/// matching condition wins. The table is total: every venue gets a label, so
/// classification can never discard a venue.
///
/// Conditions that read a derived signal only fire when the site was actually
/// inspected; a venue whose site could not be fetched falls through to the
/// default label of its profile.
pub fn classify(
    profile: ProfileType,
    website: Option<&str>,
    email: Option<&str>,
    signals: Option<&SiteSignals>,
) -> &'static str {
    match profile {
        ProfileType::Developer => match website {
            None => "no site",
            Some(url) if url.starts_with("http://") => "site without HTTPS",
            Some(url) if is_social_platform(url) => "social media only",
            Some(_) if signals.map_or(false, |s| !s.uses_https) => "site without HTTPS",
            Some(_) => "site to modernize",
        },
        ProfileType::Designer => match website {
            None => "no site",
            Some(url) if url.starts_with("http://") => "unsecured site (possibly dated design)",
            Some(_) if signals.map_or(false, |s| !s.is_responsive) => "non-responsive site",
            Some(_) => "design to improve",
        },
        ProfileType::GraphicDesigner => match website {
            None => "no visible logo",
            Some(url) if is_social_platform(url) => "social media presence only",
            Some(_) if signals.map_or(false, |s| !s.has_logo) => "no visible logo",
            Some(_) => "logo to improve",
        },
        ProfileType::Consultant => match website {
            None => "weak digital presence",
            Some(_) if email.is_none() && !signals.map_or(false, |s| s.has_contact_form) => {
                "missing contact form"
            }
            Some(_) => "conversion funnel to optimize",
        },
        ProfileType::IndependentSales => {
            if email.is_none() && !signals.map_or(false, |s| s.has_contact_form) {
                "missing contact form"
            } else if website.is_none() {
                "no visible CRM"
            } else {
                "contact system to improve"
            }
        }
        ProfileType::Unknown => "general opportunity",
    }
}
