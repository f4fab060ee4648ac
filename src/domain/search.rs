use serde::{Deserialize, Serialize};

use crate::domain::prospect::ProfileType;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub city: Option<String>,
    pub department: Option<String>,
    pub sector: Option<String>,
    pub profile_type: ProfileType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    GooglePlaces,
    Mock,
}

/// Run statistics returned alongside the prospects, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub total_places_found: usize,
    pub sites_analyzed: usize,
    pub sites_with_website: usize,
    pub results_after_filtering: usize,
    pub search_method: SearchMethod,
}

#[cfg(test)]
mod tests {
    use super::{SearchMethod, SearchRequest, SearchStats};
    use crate::domain::prospect::ProfileType;

    #[test]
    fn search_request_accepts_camel_case_body() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"city": "Paris", "sector": "Commerce", "profileType": "developer"}"#,
        )
        .unwrap();

        assert_eq!(request.city.as_deref(), Some("Paris"));
        assert!(request.department.is_none());
        assert_eq!(request.profile_type, ProfileType::Developer);
    }

    #[test]
    fn stats_serialize_with_wire_names() {
        let stats = SearchStats {
            total_places_found: 3,
            sites_analyzed: 2,
            sites_with_website: 2,
            results_after_filtering: 3,
            search_method: SearchMethod::Mock,
        };
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["totalPlacesFound"], 3);
        assert_eq!(value["searchMethod"], "mock");
    }
}
