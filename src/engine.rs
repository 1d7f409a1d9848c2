// Site engine
// Owns the catalog, the currency state, and every widget, and exposes the
// event entry points the host calls from its single event thread. Nothing
// here runs concurrently with anything else: fragment loading fans out once
// at startup, and every later entry point runs to completion.

use std::time::Duration;

use tracing::{debug, info};

use crate::activities::ActivityPanel;
use crate::catalog::{CatalogError, CityActivityCatalog};
use crate::currency::{Currency, CurrencyState, ExchangeRate, PriceFormatter};
use crate::fragments::{FragmentFetcher, FragmentLoader, FragmentSlot, HttpFragmentFetcher};
use crate::page::{ports, PageSurface, ScrollInfo};
use crate::search::{destination_url, SearchSuggester};
use crate::widgets::{
    BookingModal, HeroSlider, InquiryForm, InquirySubmission, MapConfig, ModalPanel, NavTracker,
    RevealConfig, RevealTracker,
};

// Site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub exchange_rate: ExchangeRate,
    pub fragments: Vec<FragmentSlot>,
    pub slider_interval: Duration,
    pub map: MapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            exchange_rate: ExchangeRate::default(),
            fragments: FragmentSlot::site_defaults(),
            slider_interval: Duration::from_secs(5),
            map: MapConfig::default(),
        }
    }
}

// The page engine. Construct, init once against a page adapter, then feed it
// events. Widgets whose ports were missing at init stay unwired and their
// entry points do nothing.
pub struct SiteEngine {
    config: SiteConfig,
    catalog: CityActivityCatalog,
    currency: CurrencyState,
    formatter: PriceFormatter,
    panel: ActivityPanel,
    modal: BookingModal,
    reveals: RevealTracker,
    suggester: Option<SearchSuggester>,
    slider: Option<HeroSlider>,
    nav: Option<NavTracker>,
    currency_wired: bool,
    modal_wired: bool,
    form_wired: bool,
}

impl SiteEngine {
    pub fn new(config: SiteConfig, catalog: CityActivityCatalog, currency: CurrencyState) -> Self {
        let formatter = PriceFormatter::new(config.exchange_rate);
        Self {
            config,
            catalog,
            currency,
            formatter,
            panel: ActivityPanel::default(),
            modal: BookingModal::default(),
            reveals: RevealTracker::default(),
            suggester: None,
            slider: None,
            nav: None,
            currency_wired: false,
            modal_wired: false,
            form_wired: false,
        }
    }

    // The engine with the dataset shipped in the binary
    pub fn with_bundled_catalog(config: SiteConfig) -> Result<Self, CatalogError> {
        let catalog = CityActivityCatalog::bundled()?;
        Ok(Self::new(config, catalog, CurrencyState::default()))
    }

    // An HTTP fetcher against the configured base URL, for hosts without
    // their own fragment source
    pub fn http_fetcher(&self) -> HttpFragmentFetcher {
        HttpFragmentFetcher::new(&self.config.base_url)
    }

    // How often the host should deliver slider_tick
    pub fn slider_interval(&self) -> Duration {
        self.config.slider_interval
    }

    pub fn currency(&self) -> Currency {
        self.currency.get()
    }

    pub fn catalog(&self) -> &CityActivityCatalog {
        &self.catalog
    }

    pub fn rendered_city(&self) -> Option<&str> {
        self.panel.rendered_city()
    }

    pub fn inquiries(&self) -> &[InquirySubmission] {
        self.modal.submissions()
    }

    pub fn drain_inquiries(&mut self) -> Vec<InquirySubmission> {
        self.modal.drain_submissions()
    }

    // Loads and injects every fragment first, then wires the widgets in the
    // order the page has always used: navigation, slider, search, currency,
    // modal, map, reveals last. Wiring waits for the fan-in so every widget
    // sees the complete page structure.
    pub async fn init(&mut self, fetcher: &dyn FragmentFetcher, page: &mut impl PageSurface) {
        let loader = FragmentLoader::new(self.config.fragments.clone());
        let fragments = loader.load_all(fetcher).await;
        fragments.apply(page);
        info!(
            "{}/{} fragments injected, wiring widgets",
            fragments.len(),
            self.config.fragments.len()
        );

        if page.has_element(ports::MENU_BTN) && page.has_element(ports::MOBILE_MENU) {
            self.nav = Some(NavTracker::default());
        }

        if page.has_element(ports::HERO_MAIN) {
            self.slider = HeroSlider::new(page.thumb_sources());
        }

        if page.has_element(ports::DESTINATION_SEARCH) && page.has_element(ports::SUGGESTION_BOX) {
            self.suggester = Some(SearchSuggester::new(&self.catalog));
        }

        self.currency_wired = page.has_element(ports::CURRENCY_TOGGLE);

        self.modal_wired = page.has_element(ports::BOOKING_MODAL);
        self.form_wired = page.has_element(ports::INQUIRY_FORM);
        if self.modal_wired {
            // The modal opens on the form panel until a submit flips it
            page.set_visible(ports::MODAL_FORM_CONTENT, true);
            page.set_visible(ports::MODAL_SUCCESS_CONTENT, false);
        }

        if page.has_element(ports::MAP_CONTAINER) {
            page.mount_map(&self.config.map);
        }

        page.observe_reveals(&RevealConfig::default());
    }

    // Flips the display currency, updates the toggle label, rewrites every
    // static price node from its stored USD value, and re-renders the
    // activities panel if one has been rendered. The re-render also brings a
    // previously closed panel back into view, as the page has always done.
    pub fn toggle_currency(&mut self, page: &mut impl PageSurface) {
        if !self.currency_wired {
            return;
        }

        let currency = self.currency.toggle();
        info!("display currency now {:?}", currency);
        page.set_text(ports::CURRENCY_TOGGLE, currency.toggle_label());

        for node in page.price_nodes() {
            let text = self.formatter.format_usd_value(node.usd, currency);
            page.set_price_text(&node.key, &text);
        }

        if let Some(city) = self.panel.rendered_city().map(str::to_string) {
            self.panel
                .render(&city, &self.catalog, currency, &self.formatter, page);
        }
    }

    // Search input changed. Matches show the suggestion box; no matches or an
    // empty query hide it, leaving its previous content alone.
    pub fn search_input(&mut self, query: &str, page: &mut impl PageSurface) {
        let Some(suggester) = &self.suggester else {
            return;
        };

        let matches = suggester.suggest(query);
        if matches.is_empty() {
            page.set_visible(ports::SUGGESTION_BOX, false);
        } else {
            page.render_suggestions(&matches);
            page.set_visible(ports::SUGGESTION_BOX, true);
        }
    }

    // Click landed outside the search input and suggestion box
    pub fn dismiss_suggestions(&mut self, page: &mut impl PageSurface) {
        if self.suggester.is_some() {
            page.set_visible(ports::SUGGESTION_BOX, false);
        }
    }

    // A suggestion was picked: off to the city detail page
    pub fn select_suggestion(&mut self, city: &str, page: &mut impl PageSurface) {
        if self.suggester.is_some() {
            let url = destination_url(city);
            debug!("navigating to {}", url);
            page.navigate(&url);
        }
    }

    pub fn show_city(&mut self, city: &str, page: &mut impl PageSurface) {
        self.panel
            .render(city, &self.catalog, self.currency.get(), &self.formatter, page);
    }

    pub fn close_activities(&mut self, page: &mut impl PageSurface) {
        self.panel.close(page);
    }

    // Auto-advance tick from the host's slider timer
    pub fn slider_tick(&mut self, page: &mut impl PageSurface) {
        if let Some(slider) = &mut self.slider {
            let view = slider.advance();
            page.render_hero(&view);
        }
    }

    pub fn select_thumb(&mut self, index: usize, page: &mut impl PageSurface) {
        if let Some(slider) = &mut self.slider {
            if let Some(view) = slider.select(index) {
                page.render_hero(&view);
            }
        }
    }

    pub fn scrolled(&mut self, info: ScrollInfo, page: &mut impl PageSurface) {
        if let Some(nav) = &self.nav {
            let view = nav.on_scroll(info, &page.sections(), &page.nav_links());
            page.render_nav(&view);
        }
    }

    pub fn toggle_menu(&mut self, page: &mut impl PageSurface) {
        if let Some(nav) = &mut self.nav {
            let open = nav.toggle_menu();
            page.set_visible(ports::MOBILE_MENU, open);
        }
    }

    pub fn nav_link_clicked(&mut self, page: &mut impl PageSurface) {
        if let Some(nav) = &mut self.nav {
            nav.close_menu();
            page.set_visible(ports::MOBILE_MENU, false);
        }
    }

    // Shows the modal and locks body scroll. The sub-panel is whatever it
    // was; only a submit changes it.
    pub fn open_modal(&mut self, page: &mut impl PageSurface) {
        if !self.modal_wired {
            return;
        }
        self.modal.open();
        page.set_visible(ports::BOOKING_MODAL, true);
        page.set_scroll_lock(true);
    }

    pub fn close_modal(&mut self, page: &mut impl PageSurface) {
        if !self.modal_wired {
            return;
        }
        self.modal.close();
        page.set_visible(ports::BOOKING_MODAL, false);
        page.set_scroll_lock(false);
    }

    // Inquiry form submitted: record it and swap the form panel for the
    // success panel
    pub fn submit_inquiry(&mut self, form: InquiryForm, page: &mut impl PageSurface) {
        if !self.form_wired {
            return;
        }
        info!("inquiry received for {}", form.destination);
        self.modal.submit(form);
        page.set_visible(ports::MODAL_FORM_CONTENT, false);
        page.set_visible(ports::MODAL_SUCCESS_CONTENT, true);
    }

    // Intersection change from the host's observer
    pub fn intersection_changed(
        &mut self,
        target: &str,
        intersecting: bool,
        page: &mut impl PageSurface,
    ) {
        self.reveals.update(target, intersecting);
        page.set_revealed(target, intersecting);
    }

    pub fn modal_panel(&self) -> ModalPanel {
        self.modal.panel()
    }
}
