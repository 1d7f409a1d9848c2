// Main library file for the Lakbay Pilipinas marketing site engine

// Export modules for each concern of the page
pub mod activities;
pub mod catalog;
pub mod currency;
pub mod engine;
pub mod fragments;
pub mod page;
pub mod search;
pub mod widgets;

// Re-export key types for convenience
pub use activities::{render_records, ActivityCard, ActivityPanel, PackageCard, RenderRecord};
pub use catalog::{Activity, CatalogError, CityActivityCatalog, Package};
pub use currency::{Currency, CurrencyError, CurrencyState, ExchangeRate, PriceFormatter};
pub use engine::{SiteConfig, SiteEngine};
pub use fragments::{
    FragmentError, FragmentFetcher, FragmentLoader, FragmentSet, FragmentSlot, HttpFragmentFetcher,
};
pub use page::{MemoryPage, PageSurface, PriceNode, ScrollInfo, SectionAnchor};
pub use search::{destination_url, SearchSuggester};
pub use widgets::{
    BookingModal, HeroSlider, HeroView, InquiryForm, InquirySubmission, MapConfig, ModalPanel,
    NavTracker, NavView, RevealConfig, RevealTracker,
};
