use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    configuration::SearchSettings,
    domain::{
        prospect::{Prospect, SocialLinks},
        search::{SearchMethod, SearchRequest, SearchStats},
        site_signals::SiteSignals,
        venue::Venue,
    },
};

use super::{
    classifier::classify,
    mock_data::mock_companies,
    places_client::{build_search_query, PlaceIndex},
    site_inspector::SiteInspector,
};

static POSTAL_CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{5})\s+([^,]+)").unwrap());

/// Runs one prospect search end to end: build the query, discover venues,
/// enrich and inspect them on a bounded worker pool, classify, and hand back
/// prospects plus run statistics. Discovery failure switches to the fixed
/// mock dataset instead of surfacing an error.
pub struct SearchOrchestrator<P: PlaceIndex> {
    places: Arc<P>,
    inspector: Arc<SiteInspector>,
    worker_limit: usize,
    task_timeout: Duration,
}

pub struct SearchOutcome {
    pub prospects: Vec<Prospect>,
    pub stats: SearchStats,
}

impl<P: PlaceIndex + 'static> SearchOrchestrator<P> {
    pub fn new(places: P, inspector: SiteInspector, settings: &SearchSettings) -> Self {
        SearchOrchestrator {
            places: Arc::new(places),
            inspector: Arc::new(inspector),
            worker_limit: settings.worker_limit.max(1),
            task_timeout: Duration::from_secs(settings.task_timeout_secs),
        }
    }

    pub async fn run(&self, request: &SearchRequest) -> SearchOutcome {
        let query = build_search_query(
            request.city.as_deref(),
            request.department.as_deref(),
            request.sector.as_deref(),
        );
        log::info!("Running prospect search for query: {}", query);

        let venues = match self.places.text_search(&query).await {
            Ok(venues) => venues,
            Err(e) => {
                log::error!(
                    "Venue discovery failed, switching to mock dataset: {:?}",
                    e
                );
                return self.mock_outcome(request);
            }
        };

        let total_places_found = venues.len();
        let analyzed = self.enrich_and_inspect(venues).await;

        let sites_with_website = analyzed
            .iter()
            .filter(|(venue, _)| venue.website.is_some())
            .count();
        let sites_analyzed = analyzed
            .iter()
            .filter(|(_, signals)| signals.is_some())
            .count();

        let prospects: Vec<Prospect> = analyzed
            .iter()
            .map(|(venue, signals)| self.to_prospect(venue, signals.as_ref(), request))
            .collect();

        let stats = SearchStats {
            total_places_found,
            sites_analyzed,
            sites_with_website,
            results_after_filtering: prospects.len(),
            search_method: SearchMethod::GooglePlaces,
        };
        log::info!(
            "Search done: {} places found, {} sites analyzed, {} results",
            stats.total_places_found,
            stats.sites_analyzed,
            stats.results_after_filtering
        );

        SearchOutcome { prospects, stats }
    }

    /// Per-venue enrichment and inspection on at most `worker_limit`
    /// concurrent tasks, each bounded by the task timeout. A failing task
    /// degrades its own venue only; input order is preserved.
    async fn enrich_and_inspect(&self, venues: Vec<Venue>) -> Vec<(Venue, Option<SiteSignals>)> {
        let venue_count = venues.len();
        let semaphore = Arc::new(Semaphore::new(self.worker_limit));
        let mut tasks = JoinSet::new();

        for (index, venue) in venues.into_iter().enumerate() {
            let semaphore = semaphore.clone();
            let places = self.places.clone();
            let inspector = self.inspector.clone();
            let task_timeout = self.task_timeout;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();

                let venue = enrich_venue(places.as_ref(), venue, task_timeout).await;
                let signals = match venue.website {
                    Some(ref url) => {
                        Some(inspect_site(inspector.as_ref(), url, task_timeout).await)
                    }
                    None => None,
                };

                (index, venue, signals)
            });
        }

        let mut slots: Vec<Option<(Venue, Option<SiteSignals>)>> =
            (0..venue_count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, venue, signals)) => slots[index] = Some((venue, signals)),
                Err(e) => log::error!("Venue worker task failed: {:?}", e),
            }
        }

        slots.into_iter().flatten().collect()
    }

    fn to_prospect(
        &self,
        venue: &Venue,
        signals: Option<&SiteSignals>,
        request: &SearchRequest,
    ) -> Prospect {
        let email = signals.and_then(|s| s.email.clone());
        let social_media = signals.map(|s| s.social.clone()).unwrap_or_default();
        let opportunity_type = classify(
            request.profile_type,
            venue.website.as_deref(),
            email.as_deref(),
            signals,
        )
        .to_string();

        Prospect {
            company_name: venue.name.clone(),
            city: extract_city_from_address(&venue.address, request.city.as_deref()),
            sector: match request.sector.as_deref() {
                Some(sector) => sector.to_string(),
                None => sector_from_types(&venue.types),
            },
            phone: venue.phone.clone(),
            email,
            website_url: venue.website.clone(),
            opportunity_type,
            social_media,
        }
    }

    /// Fallback path: the fixed dataset is classified with the same decision
    /// table but nothing is fetched.
    fn mock_outcome(&self, request: &SearchRequest) -> SearchOutcome {
        let prospects: Vec<Prospect> =
            mock_companies(request.city.as_deref(), request.sector.as_deref())
                .into_iter()
                .map(|company| {
                    let opportunity_type = classify(
                        request.profile_type,
                        company.website.as_deref(),
                        company.email.as_deref(),
                        None,
                    )
                    .to_string();

                    Prospect {
                        company_name: company.name,
                        city: company.city,
                        sector: company.sector,
                        phone: company.phone,
                        email: company.email,
                        website_url: company.website,
                        opportunity_type,
                        social_media: SocialLinks::default(),
                    }
                })
                .collect();

        let stats = SearchStats {
            total_places_found: prospects.len(),
            sites_analyzed: 0,
            sites_with_website: 0,
            results_after_filtering: prospects.len(),
            search_method: SearchMethod::Mock,
        };

        SearchOutcome { prospects, stats }
    }
}

async fn enrich_venue<P: PlaceIndex>(places: &P, mut venue: Venue, task_timeout: Duration) -> Venue {
    match tokio::time::timeout(task_timeout, places.place_details(&venue.place_id)).await {
        Ok(Ok(Some(details))) => venue.apply_details(details),
        Ok(Ok(None)) => {}
        Ok(Err(e)) => log::warn!("Failed to enrich venue {}: {:?}", venue.name, e),
        Err(_) => log::warn!("Timed out enriching venue {}", venue.name),
    }
    venue
}

async fn inspect_site(inspector: &SiteInspector, url: &str, task_timeout: Duration) -> SiteSignals {
    match tokio::time::timeout(task_timeout, inspector.inspect(url)).await {
        Ok(signals) => signals,
        Err(_) => {
            log::warn!("Timed out inspecting site: {}", url);
            SiteSignals::degraded(url)
        }
    }
}

/// City from a formatted address like "3 Rue du Four, 75006 Paris, France",
/// unless the request already pinned one.
fn extract_city_from_address(address: &str, request_city: Option<&str>) -> String {
    if let Some(city) = request_city {
        return city.to_string();
    }

    if let Some(captures) = POSTAL_CITY_RE.captures(address) {
        return captures[2].trim().to_string();
    }

    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 2 {
        let city = parts[parts.len() - 2].trim();
        if !city.is_empty() {
            return city.to_string();
        }
    }

    "Inconnu".to_string()
}

/// Sector label from the category tags of the places index.
fn sector_from_types(types: &[String]) -> String {
    for tag in types {
        let sector = match tag.as_str() {
            "restaurant" => "Restauration",
            "store" => "Commerce",
            "beauty_salon" => "Beauté",
            "hair_care" => "Coiffure",
            "gym" => "Sport",
            "lawyer" => "Juridique",
            "accounting" => "Comptabilité",
            "real_estate_agency" => "Immobilier",
            "travel_agency" => "Voyage",
            "car_dealer" => "Automobile",
            "pharmacy" => "Pharmacie",
            "hospital" => "Santé",
            "school" => "Éducation",
            "bank" => "Banque",
            _ => continue,
        };
        return sector.to_string();
    }

    "Commerce".to_string()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::{extract_city_from_address, sector_from_types, SearchOrchestrator};
    use crate::{
        configuration::SearchSettings,
        domain::{
            prospect::ProfileType,
            search::{SearchMethod, SearchRequest},
            venue::{PlaceDetails, Venue},
        },
        services::{places_client::PlaceIndex, site_inspector::SiteInspector},
    };

    struct FailingIndex;

    #[async_trait]
    impl PlaceIndex for FailingIndex {
        async fn text_search(&self, _query: &str) -> anyhow::Result<Vec<Venue>> {
            Err(anyhow::anyhow!("places index unreachable"))
        }

        async fn place_details(&self, _place_id: &str) -> anyhow::Result<Option<PlaceDetails>> {
            Ok(None)
        }
    }

    struct StubIndex {
        venues: Vec<Venue>,
    }

    #[async_trait]
    impl PlaceIndex for StubIndex {
        async fn text_search(&self, _query: &str) -> anyhow::Result<Vec<Venue>> {
            Ok(self.venues.clone())
        }

        async fn place_details(&self, _place_id: &str) -> anyhow::Result<Option<PlaceDetails>> {
            Ok(None)
        }
    }

    fn test_settings() -> SearchSettings {
        SearchSettings {
            worker_limit: 4,
            task_timeout_secs: 2,
        }
    }

    fn offline_venue(index: usize) -> Venue {
        Venue {
            place_id: format!("place-{}", index),
            name: format!("Venue {}", index),
            address: format!("{} Rue de la Paix, 75002 Paris, France", index),
            types: vec!["store".to_string()],
            phone: None,
            website: None,
        }
    }

    #[tokio::test]
    async fn discovery_failure_falls_back_to_mock_dataset() {
        let orchestrator =
            SearchOrchestrator::new(FailingIndex, SiteInspector::new(), &test_settings());
        let request = SearchRequest {
            city: Some("Paris".to_string()),
            department: None,
            sector: None,
            profile_type: ProfileType::Developer,
        };

        let outcome = orchestrator.run(&request).await;

        assert!(!outcome.prospects.is_empty());
        assert_eq!(outcome.stats.search_method, SearchMethod::Mock);
        assert_eq!(
            outcome.stats.results_after_filtering,
            outcome.prospects.len()
        );
        assert!(outcome
            .prospects
            .iter()
            .all(|p| !p.opportunity_type.is_empty()));
        assert!(outcome.prospects.iter().all(|p| p.city == "Paris"));
    }

    #[tokio::test]
    async fn mock_fallback_classifies_with_the_live_table() {
        let orchestrator =
            SearchOrchestrator::new(FailingIndex, SiteInspector::new(), &test_settings());
        let request = SearchRequest {
            city: None,
            department: None,
            sector: None,
            profile_type: ProfileType::Developer,
        };

        let outcome = orchestrator.run(&request).await;
        let labels: Vec<&str> = outcome
            .prospects
            .iter()
            .map(|p| p.opportunity_type.as_str())
            .collect();

        // http site, no site, https site, facebook-only, http site.
        assert_eq!(
            labels,
            vec![
                "site without HTTPS",
                "no site",
                "site to modernize",
                "social media only",
                "site without HTTPS",
            ]
        );
    }

    #[tokio::test]
    async fn stats_invariants_hold_and_order_is_preserved() {
        let venues: Vec<Venue> = (0..7).map(offline_venue).collect();
        let orchestrator = SearchOrchestrator::new(
            StubIndex { venues },
            SiteInspector::new(),
            &test_settings(),
        );
        let request = SearchRequest {
            city: None,
            department: None,
            sector: None,
            profile_type: ProfileType::Developer,
        };

        let outcome = orchestrator.run(&request).await;

        assert_eq!(outcome.stats.total_places_found, 7);
        assert!(outcome.stats.sites_analyzed <= outcome.stats.total_places_found);
        assert_eq!(outcome.stats.sites_analyzed, 0);
        assert_eq!(outcome.stats.search_method, SearchMethod::GooglePlaces);
        assert_eq!(
            outcome.stats.results_after_filtering,
            outcome.prospects.len()
        );

        let names: Vec<&str> = outcome
            .prospects
            .iter()
            .map(|p| p.company_name.as_str())
            .collect();
        let expected: Vec<String> = (0..7).map(|i| format!("Venue {}", i)).collect();
        assert_eq!(names, expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());

        assert!(outcome
            .prospects
            .iter()
            .all(|p| p.opportunity_type == "no site"));
        assert!(outcome.prospects.iter().all(|p| p.city == "Paris"));
        assert!(outcome.prospects.iter().all(|p| p.sector == "Commerce"));
    }

    #[tokio::test]
    async fn venues_with_a_website_are_counted_as_analyzed() {
        let mut venues: Vec<Venue> = (0..2).map(offline_venue).collect();
        venues.push(Venue {
            place_id: "place-web".to_string(),
            name: "Venue Web".to_string(),
            address: "1 Rue de la Paix, 75002 Paris, France".to_string(),
            types: vec!["store".to_string()],
            phone: None,
            website: Some("https://unreachable-host-zqx.invalid".to_string()),
        });
        let orchestrator = SearchOrchestrator::new(
            StubIndex { venues },
            SiteInspector::new(),
            &test_settings(),
        );
        let request = SearchRequest {
            city: None,
            department: None,
            sector: None,
            profile_type: ProfileType::Developer,
        };

        let outcome = orchestrator.run(&request).await;

        assert_eq!(outcome.stats.total_places_found, 3);
        assert_eq!(outcome.stats.sites_with_website, 1);
        assert_eq!(outcome.stats.sites_analyzed, 1);
    }

    #[test]
    fn city_comes_from_request_then_postal_match_then_segments() {
        assert_eq!(
            extract_city_from_address("3 Rue du Four, 75006 Paris, France", Some("Lyon")),
            "Lyon"
        );
        assert_eq!(
            extract_city_from_address("3 Rue du Four, 75006 Paris, France", None),
            "Paris"
        );
        assert_eq!(
            extract_city_from_address("Place du Marché, Bayeux, France", None),
            "Bayeux"
        );
        assert_eq!(extract_city_from_address("Quelque part", None), "Inconnu");
    }

    #[test]
    fn sector_mapping_uses_first_known_tag() {
        let types = vec!["point_of_interest".to_string(), "beauty_salon".to_string()];
        assert_eq!(sector_from_types(&types), "Beauté");
        assert_eq!(sector_from_types(&[]), "Commerce");
        assert_eq!(
            sector_from_types(&["unknown_tag".to_string()]),
            "Commerce"
        );
    }
}
