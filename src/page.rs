// Presentation binding for the page
// The markup fragments and this engine agree on a set of element identifiers;
// that contract is pinned here as the PageSurface port plus the ports module,
// and MemoryPage is the reference adapter used by tests and benches

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::activities::RenderRecord;
use crate::widgets::{HeroView, MapConfig, NavView, RevealConfig};

// The element identifiers shared with the markup fragments. Renaming one of
// these on either side breaks the page.
pub mod ports {
    pub const NAVBAR_PLACEHOLDER: &str = "navbar-placeholder";
    pub const HERO_PLACEHOLDER: &str = "hero-placeholder";
    pub const DESTINATIONS_PLACEHOLDER: &str = "destinations-placeholder";
    pub const PACKAGES_PLACEHOLDER: &str = "packages-placeholder";
    pub const TIPS_PLACEHOLDER: &str = "tips-placeholder";
    pub const FOOTER_PLACEHOLDER: &str = "footer-placeholder";

    pub const DESTINATION_SEARCH: &str = "destination-search";
    pub const SUGGESTION_BOX: &str = "suggestion-box";

    pub const CURRENCY_TOGGLE: &str = "currency-toggle";
    pub const PRICE_VALUE_CLASS: &str = "price-value";
    pub const PRICE_USD_ATTR: &str = "data-usd";

    pub const SELECTED_CITY_NAME: &str = "selected-city-name";
    pub const ACTIVITIES_DISPLAY: &str = "activities-display";
    pub const ACTIVITIES_GRID: &str = "activities-grid";

    pub const HERO_MAIN: &str = "hero-main";
    pub const NAV_THUMB_CLASS: &str = "nav-thumb";

    pub const MENU_BTN: &str = "menu-btn";
    pub const MOBILE_MENU: &str = "mobile-menu";

    pub const BOOKING_MODAL: &str = "booking-modal";
    pub const INQUIRY_FORM: &str = "inquiry-form";
    pub const MODAL_FORM_CONTENT: &str = "modal-form-content";
    pub const MODAL_SUCCESS_CONTENT: &str = "modal-success-content";

    pub const MAP_CONTAINER: &str = "map";
}

// One static price element: an adapter-scoped handle plus the raw value the
// markup stores in US dollars. Re-queried on every currency toggle, never
// cached across toggles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceNode {
    pub key: String,
    pub usd: f64,
}

// An in-page section anchor: its id and vertical offset from the page top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAnchor {
    pub id: String,
    pub top: f64,
}

// Scroll geometry reported by the host on every scroll event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollInfo {
    pub y: f64,
    pub viewport_height: f64,
    pub page_height: f64,
}

// The presentation port. The engine talks to the page exclusively through
// these operations; a browser adapter forwards them to the DOM, MemoryPage
// records them for inspection. Queries reflect the current page structure,
// mutations take effect immediately on the single event thread.
pub trait PageSurface {
    // Structure queries
    fn has_element(&self, id: &str) -> bool;
    fn price_nodes(&self) -> Vec<PriceNode>;
    fn thumb_sources(&self) -> Vec<String>;
    fn sections(&self) -> Vec<SectionAnchor>;
    fn nav_links(&self) -> Vec<String>;

    // Element-level mutations
    fn inject_fragment(&mut self, placeholder: &str, html: &str);
    fn set_text(&mut self, id: &str, text: &str);
    fn set_visible(&mut self, id: &str, visible: bool);
    fn set_price_text(&mut self, key: &str, text: &str);
    fn scroll_to(&mut self, id: &str);
    fn set_scroll_lock(&mut self, locked: bool);

    // Typed view updates
    fn render_suggestions(&mut self, cities: &[String]);
    fn render_activities(&mut self, records: &[RenderRecord]);
    fn render_hero(&mut self, view: &HeroView);
    fn render_nav(&mut self, view: &NavView);
    fn set_revealed(&mut self, target: &str, visible: bool);

    // Hand-offs to the host environment
    fn navigate(&mut self, url: &str);
    fn mount_map(&mut self, config: &MapConfig);
    fn observe_reveals(&mut self, config: &RevealConfig);
}

// In-memory page adapter. Declared elements mirror the ids present in the
// markup; operations against undeclared ids are dropped silently, the same
// soft failure the live page shows when a fragment did not load. Everything
// starts hidden, matching the markup's initial state.
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: BTreeSet<String>,
    fragments: HashMap<String, String>,
    texts: HashMap<String, String>,
    visible: HashMap<String, bool>,
    price_nodes: Vec<PriceNode>,
    price_texts: HashMap<String, String>,
    thumbs: Vec<String>,
    sections: Vec<SectionAnchor>,
    nav_links: Vec<String>,
    suggestions: Vec<String>,
    records: Vec<RenderRecord>,
    hero: Option<HeroView>,
    nav: Option<NavView>,
    revealed: HashMap<String, bool>,
    navigations: Vec<String>,
    scrolled_to: Vec<String>,
    scroll_locked: bool,
    map: Option<MapConfig>,
    reveal_config: Option<RevealConfig>,
}

impl MemoryPage {
    // A page with no elements at all; every widget stays unwired
    pub fn new() -> Self {
        Self::default()
    }

    // A page declaring every port the full markup provides
    pub fn standard() -> Self {
        let mut page = Self::default();
        for id in [
            ports::NAVBAR_PLACEHOLDER,
            ports::HERO_PLACEHOLDER,
            ports::DESTINATIONS_PLACEHOLDER,
            ports::PACKAGES_PLACEHOLDER,
            ports::TIPS_PLACEHOLDER,
            ports::FOOTER_PLACEHOLDER,
            ports::DESTINATION_SEARCH,
            ports::SUGGESTION_BOX,
            ports::CURRENCY_TOGGLE,
            ports::SELECTED_CITY_NAME,
            ports::ACTIVITIES_DISPLAY,
            ports::ACTIVITIES_GRID,
            ports::HERO_MAIN,
            ports::MENU_BTN,
            ports::MOBILE_MENU,
            ports::BOOKING_MODAL,
            ports::INQUIRY_FORM,
            ports::MODAL_FORM_CONTENT,
            ports::MODAL_SUCCESS_CONTENT,
            ports::MAP_CONTAINER,
        ] {
            page.elements.insert(id.to_string());
        }
        page
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string());
        self
    }

    pub fn without_element(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    pub fn with_price_node(mut self, key: &str, usd: f64) -> Self {
        self.price_nodes.push(PriceNode {
            key: key.to_string(),
            usd,
        });
        self
    }

    pub fn with_thumbs(mut self, sources: &[&str]) -> Self {
        self.thumbs = sources.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionAnchor>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_nav_links(mut self, hrefs: &[&str]) -> Self {
        self.nav_links = hrefs.iter().map(|s| s.to_string()).collect();
        self
    }

    // Inspection for tests

    pub fn fragment(&self, placeholder: &str) -> Option<&str> {
        self.fragments.get(placeholder).map(String::as_str)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.get(id).copied().unwrap_or(false)
    }

    pub fn price_text(&self, key: &str) -> Option<&str> {
        self.price_texts.get(key).map(String::as_str)
    }

    pub fn records(&self) -> &[RenderRecord] {
        &self.records
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn hero_view(&self) -> Option<&HeroView> {
        self.hero.as_ref()
    }

    pub fn nav_view(&self) -> Option<&NavView> {
        self.nav.as_ref()
    }

    pub fn is_revealed(&self, target: &str) -> bool {
        self.revealed.get(target).copied().unwrap_or(false)
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn scrolled_to(&self) -> &[String] {
        &self.scrolled_to
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn mounted_map(&self) -> Option<&MapConfig> {
        self.map.as_ref()
    }

    pub fn observed_reveals(&self) -> Option<&RevealConfig> {
        self.reveal_config.as_ref()
    }
}

impl PageSurface for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn price_nodes(&self) -> Vec<PriceNode> {
        self.price_nodes.clone()
    }

    fn thumb_sources(&self) -> Vec<String> {
        self.thumbs.clone()
    }

    fn sections(&self) -> Vec<SectionAnchor> {
        self.sections.clone()
    }

    fn nav_links(&self) -> Vec<String> {
        self.nav_links.clone()
    }

    fn inject_fragment(&mut self, placeholder: &str, html: &str) {
        if !self.elements.contains(placeholder) {
            return;
        }
        self.fragments.insert(placeholder.to_string(), html.to_string());
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if !self.elements.contains(id) {
            return;
        }
        self.texts.insert(id.to_string(), text.to_string());
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if !self.elements.contains(id) {
            return;
        }
        self.visible.insert(id.to_string(), visible);
    }

    fn set_price_text(&mut self, key: &str, text: &str) {
        if self.price_nodes.iter().any(|node| node.key == key) {
            self.price_texts.insert(key.to_string(), text.to_string());
        }
    }

    fn scroll_to(&mut self, id: &str) {
        if !self.elements.contains(id) {
            return;
        }
        self.scrolled_to.push(id.to_string());
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn render_suggestions(&mut self, cities: &[String]) {
        self.suggestions = cities.to_vec();
    }

    fn render_activities(&mut self, records: &[RenderRecord]) {
        // Wholesale replacement, never an incremental diff
        self.records = records.to_vec();
    }

    fn render_hero(&mut self, view: &HeroView) {
        self.hero = Some(view.clone());
    }

    fn render_nav(&mut self, view: &NavView) {
        self.nav = Some(view.clone());
    }

    fn set_revealed(&mut self, target: &str, visible: bool) {
        self.revealed.insert(target.to_string(), visible);
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn mount_map(&mut self, config: &MapConfig) {
        self.map = Some(config.clone());
    }

    fn observe_reveals(&mut self, config: &RevealConfig) {
        self.reveal_config = Some(config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_against_undeclared_ids_are_dropped() {
        let mut page = MemoryPage::new();
        page.set_text(ports::SELECTED_CITY_NAME, "Activities in Cebu");
        page.set_visible(ports::ACTIVITIES_DISPLAY, true);
        page.inject_fragment(ports::NAVBAR_PLACEHOLDER, "<nav></nav>");
        page.scroll_to(ports::ACTIVITIES_DISPLAY);

        assert!(page.text(ports::SELECTED_CITY_NAME).is_none());
        assert!(!page.is_visible(ports::ACTIVITIES_DISPLAY));
        assert!(page.fragment(ports::NAVBAR_PLACEHOLDER).is_none());
        assert!(page.scrolled_to().is_empty());
    }

    #[test]
    fn test_declared_elements_record_mutations() {
        let mut page = MemoryPage::new()
            .with_element(ports::CURRENCY_TOGGLE)
            .with_element(ports::SUGGESTION_BOX);

        page.set_text(ports::CURRENCY_TOGGLE, "USD $");
        page.set_visible(ports::SUGGESTION_BOX, true);

        assert_eq!(page.text(ports::CURRENCY_TOGGLE), Some("USD $"));
        assert!(page.is_visible(ports::SUGGESTION_BOX));
    }

    #[test]
    fn test_everything_starts_hidden() {
        let page = MemoryPage::standard();
        assert!(!page.is_visible(ports::ACTIVITIES_DISPLAY));
        assert!(!page.is_visible(ports::BOOKING_MODAL));
        assert!(!page.is_visible(ports::SUGGESTION_BOX));
    }

    #[test]
    fn test_price_nodes_round_trip() {
        let mut page = MemoryPage::new().with_price_node("package-boracay", 50.0);
        let nodes = page.price_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].usd, 50.0);

        page.set_price_text("package-boracay", "₱2,963");
        assert_eq!(page.price_text("package-boracay"), Some("₱2,963"));

        // Unknown keys are ignored, matching the class-scoped DOM query
        page.set_price_text("missing", "₱1");
        assert!(page.price_text("missing").is_none());
    }
}
