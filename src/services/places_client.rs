use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::venue::{PlaceDetails, Venue};

const MAX_RESULTS: usize = 20;

/// Seam over the external places index so the orchestrator can be driven by
/// stub and failing indexes in tests.
#[async_trait]
pub trait PlaceIndex: Send + Sync {
    async fn text_search(&self, query: &str) -> anyhow::Result<Vec<Venue>>;
    async fn place_details(&self, place_id: &str) -> anyhow::Result<Option<PlaceDetails>>;
}

pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: String,
    search_url: String,
    details_url: String,
}

#[derive(Serialize)]
struct TextSearchQuery<'a> {
    query: &'a str,
    key: &'a str,
    language: &'a str,
    region: &'a str,
}

#[derive(Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResult {
    place_id: String,
    name: Option<String>,
    formatted_address: Option<String>,
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Serialize)]
struct DetailsQuery<'a> {
    place_id: &'a str,
    fields: &'a str,
    key: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        GooglePlacesClient {
            client,
            api_key,
            search_url: "https://maps.googleapis.com/maps/api/place/textsearch/json".to_string(),
            details_url: "https://maps.googleapis.com/maps/api/place/details/json".to_string(),
        }
    }
}

#[async_trait]
impl PlaceIndex for GooglePlacesClient {
    async fn text_search(&self, query: &str) -> anyhow::Result<Vec<Venue>> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&TextSearchQuery {
                query,
                key: &self.api_key,
                language: "fr",
                region: "fr",
            })
            .send()
            .await?;

        let payload: TextSearchResponse = response.json().await?;
        if payload.status != "OK" {
            anyhow::bail!(
                "places index returned status {}: {}",
                payload.status,
                payload.error_message.unwrap_or_default()
            );
        }

        let venues: Vec<Venue> = payload
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(|place| Venue {
                place_id: place.place_id,
                name: place.name.unwrap_or_else(|| "Entreprise".to_string()),
                address: place
                    .formatted_address
                    .or(place.vicinity)
                    .unwrap_or_default(),
                types: place.types,
                phone: None,
                website: None,
            })
            .collect();

        log::info!("Found {} venues for query: {}", venues.len(), query);
        Ok(venues)
    }

    async fn place_details(&self, place_id: &str) -> anyhow::Result<Option<PlaceDetails>> {
        let response = self
            .client
            .get(&self.details_url)
            .query(&DetailsQuery {
                place_id,
                fields: "name,formatted_phone_number,website,formatted_address,types,international_phone_number",
                key: &self.api_key,
                language: "fr",
            })
            .send()
            .await?;

        let payload: DetailsResponse = response.json().await?;
        match payload.status.as_str() {
            "OK" => Ok(payload.result),
            status => {
                log::warn!("Place details for {} returned status {}", place_id, status);
                Ok(None)
            }
        }
    }
}

/// Query rule: sector first, then city, else "département N", else the
/// country-wide fallback. Blank tokens count as absent.
pub fn build_search_query(
    city: Option<&str>,
    department: Option<&str>,
    sector: Option<&str>,
) -> String {
    let city = city.filter(|c| !c.trim().is_empty());
    let department = department.filter(|d| !d.trim().is_empty());
    let sector = sector.filter(|s| !s.trim().is_empty());

    let mut parts: Vec<String> = Vec::new();
    if let Some(sector) = sector {
        parts.push(sector.trim().to_string());
    }
    match (city, department) {
        (Some(city), _) => parts.push(city.trim().to_string()),
        (None, Some(department)) => parts.push(format!("département {}", department.trim())),
        (None, None) => parts.push("France".to_string()),
    }

    parts.join(" ")
}
