// Static per-city activity catalog
// The dataset behind the destination cards: every city maps to an ordered
// list of bookable activities and at most one bundled package

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// The dataset shipped with the site, embedded at compile time
const BUNDLED_CATALOG_JSON: &str = include_str!("../data/catalog.json");

// Error types for catalog construction
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate city in catalog: {0}")]
    DuplicateCity(String),
}

// One bookable activity as authored in the catalog. The price is kept as the
// raw display string (usually peso-marked, occasionally a bare number) and
// only interpreted at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    pub image: String,
    pub rating: f64,
    pub price: String,
}

// The bundled multi-day package a city may offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub title: String,
    pub details: String,
    pub price: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    cities: Vec<CityDocument>,
}

#[derive(Debug, Deserialize)]
struct CityDocument {
    name: String,
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    package: Option<Package>,
}

#[derive(Debug, Clone)]
struct CityRecord {
    name: String,
    activities: Vec<Activity>,
    package: Option<Package>,
}

// Read-only lookup of activities and packages per city. Populated once at
// startup; lookups for unknown cities return empty results rather than
// errors. City order follows the source document.
#[derive(Debug, Clone, Default)]
pub struct CityActivityCatalog {
    cities: Vec<CityRecord>,
    index: HashMap<String, usize>,
}

impl CityActivityCatalog {
    // Parses a catalog document. City names must be unique; lookup is
    // exact-match and case-sensitive, the same way the site keys its data.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;

        let mut cities = Vec::with_capacity(document.cities.len());
        let mut index = HashMap::with_capacity(document.cities.len());
        for city in document.cities {
            if index.contains_key(&city.name) {
                return Err(CatalogError::DuplicateCity(city.name));
            }
            index.insert(city.name.clone(), cities.len());
            cities.push(CityRecord {
                name: city.name,
                activities: city.activities,
                package: city.package,
            });
        }

        Ok(Self { cities, index })
    }

    // The dataset embedded in the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG_JSON)
    }

    pub fn activities_for(&self, city: &str) -> &[Activity] {
        match self.index.get(city) {
            Some(&i) => &self.cities[i].activities,
            None => &[],
        }
    }

    pub fn package_for(&self, city: &str) -> Option<&Package> {
        let &i = self.index.get(city)?;
        self.cities[i].package.as_ref()
    }

    // City names in catalog order
    pub fn city_names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|city| city.name.as_str())
    }

    pub fn contains(&self, city: &str) -> bool {
        self.index.contains_key(city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
