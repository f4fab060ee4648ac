use serde::{Deserialize, Serialize};

/// The five freelance trades that drive the opportunity rules. Anything else
/// deserializes to `Unknown` and gets the generic opportunity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileType {
    Developer,
    Designer,
    GraphicDesigner,
    Consultant,
    IndependentSales,
    #[serde(other)]
    Unknown,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Developer => "developer",
            ProfileType::Designer => "designer",
            ProfileType::GraphicDesigner => "graphic-designer",
            ProfileType::Consultant => "consultant",
            ProfileType::IndependentSales => "independent-sales",
            ProfileType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
}

/// A venue enriched, inspected and classified, ready to be returned and
/// persisted. `opportunity_type` is always set; immutable once created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub company_name: String,
    pub city: String,
    pub sector: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub opportunity_type: String,
    pub social_media: SocialLinks,
}

#[cfg(test)]
mod tests {
    use super::ProfileType;

    #[test]
    fn profile_type_parses_known_identifiers() {
        let profile: ProfileType = serde_json::from_str(r#""graphic-designer""#).unwrap();
        assert_eq!(profile, ProfileType::GraphicDesigner);

        let profile: ProfileType = serde_json::from_str(r#""independent-sales""#).unwrap();
        assert_eq!(profile, ProfileType::IndependentSales);
    }

    #[test]
    fn profile_type_falls_back_to_unknown() {
        let profile: ProfileType = serde_json::from_str(r#""astronaut""#).unwrap();
        assert_eq!(profile, ProfileType::Unknown);
    }
}
