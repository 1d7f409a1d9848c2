// Activity rendering
// Turns a city's catalog entry into presentation-agnostic render records and
// drives the on-page activities panel. The panel remembers which city it last
// rendered; the currency toggle uses that to re-render after a flip.

use serde::Serialize;
use tracing::debug;

use crate::catalog::CityActivityCatalog;
use crate::currency::{Currency, PriceFormatter};
use crate::page::{ports, PageSurface};

// One activity card, price already formatted for the current currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityCard {
    pub title: String,
    pub image: String,
    pub rating: f64,
    pub price: String,
}

// The "Best Value" package card a city may close its grid with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageCard {
    pub title: String,
    pub details: String,
    pub price: String,
}

// A displayable card. The package variant is the one visually distinguished
// card and always comes last.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderRecord {
    Activity(ActivityCard),
    Package(PackageCard),
}

impl RenderRecord {
    pub fn featured(&self) -> bool {
        matches!(self, RenderRecord::Package(_))
    }

    pub fn title(&self) -> &str {
        match self {
            RenderRecord::Activity(card) => &card.title,
            RenderRecord::Package(card) => &card.title,
        }
    }

    pub fn price(&self) -> &str {
        match self {
            RenderRecord::Activity(card) => &card.price,
            RenderRecord::Package(card) => &card.price,
        }
    }
}

// Builds the render records for a city: one per activity in catalog order,
// then the package record last if the city has one. Unknown cities come back
// empty. Pure function of its inputs.
pub fn render_records(
    catalog: &CityActivityCatalog,
    city: &str,
    currency: Currency,
    formatter: &PriceFormatter,
) -> Vec<RenderRecord> {
    let activities = catalog.activities_for(city);
    let mut records = Vec::with_capacity(activities.len() + 1);

    for activity in activities {
        records.push(RenderRecord::Activity(ActivityCard {
            title: activity.title.clone(),
            image: activity.image.clone(),
            rating: activity.rating,
            price: formatter.format(&activity.price, currency),
        }));
    }

    if let Some(package) = catalog.package_for(city) {
        records.push(RenderRecord::Package(PackageCard {
            title: package.title.clone(),
            details: package.details.clone(),
            price: formatter.format(&package.price, currency),
        }));
    }

    records
}

// The activities panel below the destination cards. Holds the one piece of
// state the currency toggle depends on: the city last rendered.
#[derive(Debug, Default)]
pub struct ActivityPanel {
    rendered_city: Option<String>,
}

impl ActivityPanel {
    // The city currently backing the panel's content. Survives close(); only
    // a later render overwrites it.
    pub fn rendered_city(&self) -> Option<&str> {
        self.rendered_city.as_deref()
    }

    // Renders a city into the panel: sets the title, replaces the grid
    // content wholesale, shows the surface, and brings it into view. A city
    // missing from the catalog is a no-op, with no partial render.
    pub fn render(
        &mut self,
        city: &str,
        catalog: &CityActivityCatalog,
        currency: Currency,
        formatter: &PriceFormatter,
        page: &mut impl PageSurface,
    ) {
        if !catalog.contains(city) {
            debug!("ignoring render for unknown city '{}'", city);
            return;
        }

        let records = render_records(catalog, city, currency, formatter);
        debug!("rendering {} cards for {}", records.len(), city);

        page.set_text(ports::SELECTED_CITY_NAME, &format!("Activities in {}", city));
        page.render_activities(&records);
        self.rendered_city = Some(city.to_string());

        page.set_visible(ports::ACTIVITIES_DISPLAY, true);
        page.scroll_to(ports::ACTIVITIES_DISPLAY);
    }

    // Hides the surface without clearing its content. The stale content and
    // the rendered-city indicator both stay until the next render.
    pub fn close(&self, page: &mut impl PageSurface) {
        page.set_visible(ports::ACTIVITIES_DISPLAY, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CityActivityCatalog;
    use crate::currency::ExchangeRate;
    use crate::page::MemoryPage;

    const CEBU_FIXTURE: &str = r#"{
        "cities": [
            {
                "name": "Cebu",
                "activities": [
                    {
                        "title": "Kawasan Falls Canyoneering",
                        "image": "images/cebu-kawasan.jpg",
                        "rating": 4.9,
                        "price": "₱1,500"
                    },
                    {
                        "title": "Oslob Whale Shark Watching",
                        "image": "images/cebu-oslob.jpg",
                        "rating": 4.6,
                        "price": "₱1,000"
                    }
                ],
                "package": {
                    "title": "3D2N South Cebu Adventure",
                    "details": "Canyoneering and whale sharks with transfers.",
                    "price": "₱9,800"
                }
            }
        ]
    }"#;

    fn fixture() -> (CityActivityCatalog, PriceFormatter) {
        let catalog = CityActivityCatalog::from_json(CEBU_FIXTURE).unwrap();
        let formatter = PriceFormatter::new(ExchangeRate::default());
        (catalog, formatter)
    }

    #[test]
    fn test_two_activities_and_a_package_make_three_records() {
        let (catalog, formatter) = fixture();
        let records = render_records(&catalog, "Cebu", Currency::Php, &formatter);

        assert_eq!(records.len(), 3);
        assert!(!records[0].featured());
        assert!(!records[1].featured());
        assert!(records[2].featured());
        assert_eq!(records[2].title(), "3D2N South Cebu Adventure");
    }

    #[test]
    fn test_records_follow_catalog_order() {
        let (catalog, formatter) = fixture();
        let records = render_records(&catalog, "Cebu", Currency::Php, &formatter);

        assert_eq!(records[0].title(), "Kawasan Falls Canyoneering");
        assert_eq!(records[1].title(), "Oslob Whale Shark Watching");
    }

    #[test]
    fn test_prices_formatted_for_requested_currency() {
        let (catalog, formatter) = fixture();

        // Peso-marked catalog prices pass through untouched in Php
        let php = render_records(&catalog, "Cebu", Currency::Php, &formatter);
        assert_eq!(php[0].price(), "₱1,500");
        assert_eq!(php[2].price(), "₱9,800");

        let usd = render_records(&catalog, "Cebu", Currency::Usd, &formatter);
        assert_eq!(usd[0].price(), "US$ 25.32");
        assert_eq!(usd[1].price(), "US$ 16.88");
        assert_eq!(usd[2].price(), "US$ 165.40");
    }

    #[test]
    fn test_unknown_city_yields_no_records() {
        let (catalog, formatter) = fixture();
        assert!(render_records(&catalog, "Atlantis", Currency::Php, &formatter).is_empty());
    }

    #[test]
    fn test_render_populates_panel_and_scrolls() {
        let (catalog, formatter) = fixture();
        let mut panel = ActivityPanel::default();
        let mut page = MemoryPage::standard();

        panel.render("Cebu", &catalog, Currency::Php, &formatter, &mut page);

        assert_eq!(
            page.text(ports::SELECTED_CITY_NAME),
            Some("Activities in Cebu")
        );
        assert_eq!(page.records().len(), 3);
        assert!(page.is_visible(ports::ACTIVITIES_DISPLAY));
        assert_eq!(page.scrolled_to(), &[ports::ACTIVITIES_DISPLAY.to_string()]);
        assert_eq!(panel.rendered_city(), Some("Cebu"));
    }

    #[test]
    fn test_unknown_city_render_is_a_complete_noop() {
        let (catalog, formatter) = fixture();
        let mut panel = ActivityPanel::default();
        let mut page = MemoryPage::standard();

        panel.render("Atlantis", &catalog, Currency::Php, &formatter, &mut page);

        assert!(page.text(ports::SELECTED_CITY_NAME).is_none());
        assert!(page.records().is_empty());
        assert!(!page.is_visible(ports::ACTIVITIES_DISPLAY));
        assert!(page.scrolled_to().is_empty());
        assert!(panel.rendered_city().is_none());
    }

    #[test]
    fn test_close_keeps_content_and_indicator() {
        let (catalog, formatter) = fixture();
        let mut panel = ActivityPanel::default();
        let mut page = MemoryPage::standard();

        panel.render("Cebu", &catalog, Currency::Php, &formatter, &mut page);
        panel.close(&mut page);

        // Hidden, but the stale content and indicator survive
        assert!(!page.is_visible(ports::ACTIVITIES_DISPLAY));
        assert_eq!(page.records().len(), 3);
        assert_eq!(panel.rendered_city(), Some("Cebu"));
    }

    #[test]
    fn test_rerender_replaces_content_wholesale() {
        let (catalog, formatter) = fixture();
        let mut panel = ActivityPanel::default();
        let mut page = MemoryPage::standard();

        panel.render("Cebu", &catalog, Currency::Php, &formatter, &mut page);
        panel.render("Cebu", &catalog, Currency::Usd, &formatter, &mut page);

        // Still three records, now in dollars; nothing accumulated
        assert_eq!(page.records().len(), 3);
        assert_eq!(page.records()[0].price(), "US$ 25.32");
    }
}
