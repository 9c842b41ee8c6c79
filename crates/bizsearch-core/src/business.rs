use serde::{Deserialize, Serialize};

/// A business record as returned by the query service.
///
/// Owned by the current result batch and replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Distance from the searched location in meters. Absent for lookups by id.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub categories: Vec<BusinessCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl Location {
    /// Renders `"city, zip"`, skipping whichever part is missing.
    #[must_use]
    pub fn display(&self) -> String {
        [self.city.as_deref(), self.zip_code.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCategory {
    pub alias: String,
    pub title: String,
}

/// One page of businesses plus the total number the service reports.
///
/// Both fetch modes (search and favorites lookup) are normalized into this
/// shape before they reach a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBatch {
    pub total: u32,
    pub business: Vec<Business>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_deserializes_with_missing_optional_fields() {
        let json = serde_json::json!({
            "id": "abc",
            "name": "Blue Plate",
            "url": "https://www.yelp.com/biz/blue-plate"
        });
        let biz: Business = serde_json::from_value(json).expect("deserialize");
        assert_eq!(biz.id, "abc");
        assert!(biz.distance.is_none());
        assert!(biz.photos.is_empty());
        assert_eq!(biz.location, Location::default());
        assert!(biz.categories.is_empty());
    }

    #[test]
    fn location_display_joins_present_parts() {
        let full = Location {
            city: Some("Santa Monica".to_string()),
            zip_code: Some("90402".to_string()),
        };
        assert_eq!(full.display(), "Santa Monica, 90402");

        let zip_only = Location {
            city: None,
            zip_code: Some("90402".to_string()),
        };
        assert_eq!(zip_only.display(), "90402");
        assert_eq!(Location::default().display(), "");
    }
}
