// Destination search suggestions
// Case-insensitive substring matching over the catalog's city names. The
// catalog never changes after startup, so the suggester snapshots the names
// once at wiring.

use crate::catalog::CityActivityCatalog;

// Where a picked suggestion navigates to
const DESTINATION_PAGE: &str = "cityDestination.html";

#[derive(Debug, Clone)]
pub struct SearchSuggester {
    cities: Vec<String>,
}

impl SearchSuggester {
    pub fn new(catalog: &CityActivityCatalog) -> Self {
        Self {
            cities: catalog.city_names().map(str::to_string).collect(),
        }
    }

    // Cities whose name contains the query, case-insensitively, in catalog
    // order. An empty query suggests nothing rather than everything, so the
    // box stays hidden until the visitor types.
    pub fn suggest(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.cities
            .iter()
            .filter(|city| city.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

// The per-city detail URL a selected suggestion navigates to, city name
// carried as a percent-encoded query parameter
pub fn destination_url(city: &str) -> String {
    format!("{}?city={}", DESTINATION_PAGE, urlencoding::encode(city))
}
