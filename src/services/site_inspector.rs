use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{prospect::SocialLinks, site_signals::SiteSignals};

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(8);
const MAX_REDIRECTS: usize = 5;

// Throwaway addresses that must never be reported as a contact email.
const EMAIL_REJECT_LIST: [&str; 5] = [
    "example.com",
    "test.com",
    "placeholder",
    "noreply",
    "no-reply",
];

/// Fetches a venue's website and derives contact and structural signals from
/// the HTML. Every fetch failure degrades silently; inspection never fails.
pub struct SiteInspector {
    client: reqwest::Client,
    email_re: Regex,
}

impl SiteInspector {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .unwrap();
        let email_re = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();

        SiteInspector { client, email_re }
    }

    pub async fn inspect(&self, url: &str) -> SiteSignals {
        // Social-platform pages are profiles, not company sites; they are
        // excluded from inspection and email extraction outright.
        if is_social_platform(url) {
            return SiteSignals::degraded(url);
        }

        let target = normalize_target_url(url);
        let response = match self.client.get(&target).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Failed to fetch {}: {}", target, e);
                // Scheme information comes from the URL as the venue
                // published it, not from the normalized fetch target.
                return SiteSignals::degraded(url);
            }
        };

        // Scheme of the final resolved URL, after redirects.
        let uses_https = response.url().scheme() == "https";

        match response.text().await {
            Ok(body) => self.parse_signals(uses_https, &body),
            Err(e) => {
                log::warn!("Failed to read body from {}: {}", target, e);
                SiteSignals {
                    uses_https,
                    ..SiteSignals::default()
                }
            }
        }
    }

    /// Pure part of the inspection, split out so fixtures can exercise it
    /// without a network.
    pub fn parse_signals(&self, uses_https: bool, html: &str) -> SiteSignals {
        let document = Html::parse_document(html);
        let lower_html = html.to_lowercase();

        SiteSignals {
            uses_https,
            is_responsive: detect_responsive(&document, &lower_html),
            has_contact_form: detect_contact_form(&document, &lower_html),
            has_logo: detect_logo(&document),
            email: self.extract_email(&document),
            social: extract_social_links(&document),
        }
    }

    /// First plausible address in the page text that is not on the reject
    /// list, falling back to the first `mailto:` link target.
    pub fn extract_email(&self, document: &Html) -> Option<String> {
        let text: String = document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ");

        for candidate in self.email_re.find_iter(&text) {
            let lowered = candidate.as_str().to_lowercase();
            if EMAIL_REJECT_LIST.iter().any(|banned| lowered.contains(banned)) {
                continue;
            }
            return Some(candidate.as_str().to_string());
        }

        let mailto_selector = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
        document
            .select(&mailto_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| {
                href.trim_start_matches("mailto:")
                    .split('?')
                    .next()
                    .unwrap_or("")
                    .to_string()
            })
            .filter(|email| !email.is_empty())
    }
}

impl Default for SiteInspector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_social_platform(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => {
                let host = host.strip_prefix("www.").unwrap_or(host);
                host == "facebook.com"
                    || host.ends_with(".facebook.com")
                    || host == "instagram.com"
                    || host.ends_with(".instagram.com")
            }
            None => false,
        },
        Err(_) => url.contains("facebook.com") || url.contains("instagram.com"),
    }
}

fn normalize_target_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

fn detect_responsive(document: &Html, lower_html: &str) -> bool {
    let viewport_selector = Selector::parse(r#"meta[name="viewport"]"#).unwrap();
    let has_viewport_width = document
        .select(&viewport_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.contains("width"))
        .unwrap_or(false);
    if has_viewport_width {
        return true;
    }

    if lower_html.contains("responsive") || lower_html.contains("mobile") {
        return true;
    }

    let screen_css_selector =
        Selector::parse(r#"link[rel*="stylesheet"][media*="screen"]"#).unwrap();
    document.select(&screen_css_selector).next().is_some()
}

fn detect_contact_form(document: &Html, lower_html: &str) -> bool {
    let form_selector = Selector::parse("form").unwrap();
    if document.select(&form_selector).next().is_some() {
        return true;
    }

    if lower_html.contains("contact") || lower_html.contains("formulaire") {
        return true;
    }

    let contact_link_selector =
        Selector::parse(r#"a[href*="contact"], a[href*="mailto"]"#).unwrap();
    document.select(&contact_link_selector).next().is_some()
}

fn detect_logo(document: &Html) -> bool {
    let all_selector = Selector::parse("*").unwrap();
    for element in document.select(&all_selector) {
        let value = element.value();
        let class = value.attr("class").unwrap_or("").to_lowercase();
        let id = value.attr("id").unwrap_or("").to_lowercase();
        if class.contains("logo") || id.contains("logo") {
            return true;
        }
        if value.name() == "img" {
            let alt = value.attr("alt").unwrap_or("").to_lowercase();
            let src = value.attr("src").unwrap_or("").to_lowercase();
            if alt.contains("logo") || src.contains("logo") {
                return true;
            }
        }
    }
    false
}

/// First anchor per platform wins; URLs are made absolute and stripped of
/// query string and fragment.
pub fn extract_social_links(document: &Html) -> SocialLinks {
    let mut links = SocialLinks::default();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(href) => href.to_lowercase(),
            None => continue,
        };

        if links.facebook.is_none() && href.contains("facebook.com") {
            links.facebook = Some(normalize_social_url(&href));
        }
        if links.instagram.is_none() && href.contains("instagram.com") {
            links.instagram = Some(normalize_social_url(&href));
        }
        if links.linkedin.is_none() && href.contains("linkedin.com") {
            links.linkedin = Some(normalize_social_url(&href));
        }
        if links.twitter.is_none() && (href.contains("twitter.com") || href.contains("x.com")) {
            links.twitter = Some(normalize_social_url(&href));
        }
        if links.youtube.is_none() && (href.contains("youtube.com") || href.contains("youtu.be")) {
            links.youtube = Some(normalize_social_url(&href));
        }
    }

    links
}

fn normalize_social_url(href: &str) -> String {
    let absolute = if href.starts_with("http") {
        href.to_string()
    } else {
        format!("https://{}", href)
    };

    match absolute.split(['?', '#']).next() {
        Some(base) => base.to_string(),
        None => absolute,
    }
}
