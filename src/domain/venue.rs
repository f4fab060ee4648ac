use serde::Deserialize;

/// One business entity returned by the places index for a query. Lives only
/// for the duration of a single search request.
#[derive(Debug, Clone)]
pub struct Venue {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub types: Vec<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Richer fields from the details endpoint of the places index.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub formatted_address: Option<String>,
    pub types: Option<Vec<String>>,
}

impl Venue {
    pub fn apply_details(&mut self, details: PlaceDetails) {
        if let Some(phone) = details
            .formatted_phone_number
            .or(details.international_phone_number)
        {
            self.phone = Some(phone);
        }
        if let Some(website) = details.website.filter(|w| !w.trim().is_empty()) {
            self.website = Some(website);
        }
        if let Some(address) = details.formatted_address {
            self.address = address;
        }
        if let Some(types) = details.types {
            if self.types.is_empty() {
                self.types = types;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaceDetails, Venue};

    fn base_venue() -> Venue {
        Venue {
            place_id: "p1".to_string(),
            name: "Boulangerie Martin".to_string(),
            address: "Paris".to_string(),
            types: vec![],
            phone: None,
            website: None,
        }
    }

    #[test]
    fn apply_details_fills_missing_fields() {
        let mut venue = base_venue();
        venue.apply_details(PlaceDetails {
            name: None,
            formatted_phone_number: Some("01 23 45 67 89".to_string()),
            international_phone_number: None,
            website: Some("https://boulangerie-martin.fr".to_string()),
            formatted_address: Some("3 Rue du Four, 75006 Paris, France".to_string()),
            types: Some(vec!["store".to_string()]),
        });

        assert_eq!(venue.phone.as_deref(), Some("01 23 45 67 89"));
        assert_eq!(venue.website.as_deref(), Some("https://boulangerie-martin.fr"));
        assert_eq!(venue.address, "3 Rue du Four, 75006 Paris, France");
        assert_eq!(venue.types, vec!["store".to_string()]);
    }

    #[test]
    fn apply_details_treats_blank_website_as_absent() {
        let mut venue = base_venue();
        venue.apply_details(PlaceDetails {
            name: None,
            formatted_phone_number: None,
            international_phone_number: None,
            website: Some("  ".to_string()),
            formatted_address: None,
            types: None,
        });

        assert!(venue.website.is_none());
    }

    #[test]
    fn apply_details_keeps_base_fields_when_details_are_empty() {
        let mut venue = base_venue();
        venue.apply_details(PlaceDetails {
            name: None,
            formatted_phone_number: None,
            international_phone_number: None,
            website: None,
            formatted_address: None,
            types: None,
        });

        assert_eq!(venue.address, "Paris");
        assert!(venue.phone.is_none());
        assert!(venue.website.is_none());
    }
}
