// Startup fragment loading
// The landing page is assembled from named HTML fragments. All fetches go out
// at once and initialization proceeds only after every one has settled; a
// fragment that fails just leaves its placeholder empty.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, error};

use crate::page::{ports, PageSurface};

// Error types for fragment fetching
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fragment {path} returned status {status}")]
    BadStatus { path: String, status: u16 },

    #[error("Fragment {path} is not valid UTF-8")]
    InvalidUtf8 { path: String },
}

// A placeholder element and the fragment path that fills it
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSlot {
    pub placeholder: String,
    pub path: String,
}

impl FragmentSlot {
    pub fn new(placeholder: &str, path: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            path: path.to_string(),
        }
    }

    // The fragment set the landing page ships with
    pub fn site_defaults() -> Vec<FragmentSlot> {
        vec![
            Self::new(ports::NAVBAR_PLACEHOLDER, "components/Navbar.html"),
            Self::new(ports::HERO_PLACEHOLDER, "components/Hero.html"),
            Self::new(ports::DESTINATIONS_PLACEHOLDER, "components/Destinations.html"),
            Self::new(ports::PACKAGES_PLACEHOLDER, "components/Packages.html"),
            Self::new(ports::TIPS_PLACEHOLDER, "components/Tips.html"),
            Self::new(ports::FOOTER_PLACEHOLDER, "components/Footer.html"),
        ]
    }
}

// Source of fragment payloads. Production uses HTTP; tests swap in an
// in-memory server.
#[async_trait]
pub trait FragmentFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Bytes, FragmentError>;
}

// Fetches fragments over HTTP relative to the site base URL
pub struct HttpFragmentFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFragmentFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FragmentFetcher for HttpFragmentFetcher {
    async fn fetch(&self, path: &str) -> Result<Bytes, FragmentError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FragmentError::Http {
                path: path.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FragmentError::BadStatus {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.bytes().await.map_err(|source| FragmentError::Http {
            path: path.to_string(),
            source,
        })
    }
}

// The fragments that actually arrived, keyed by placeholder
#[derive(Debug, Default)]
pub struct FragmentSet {
    payloads: DashMap<String, String>,
}

impl FragmentSet {
    fn insert(&self, placeholder: String, html: String) {
        self.payloads.insert(placeholder, html);
    }

    pub fn get(&self, placeholder: &str) -> Option<String> {
        self.payloads.get(placeholder).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    // Injects every fetched payload verbatim into its placeholder. No schema
    // validation; the fragments are trusted markup.
    pub fn apply(&self, page: &mut impl PageSurface) {
        for entry in self.payloads.iter() {
            page.inject_fragment(entry.key(), entry.value());
        }
    }
}

// Issues every fragment fetch concurrently and returns once all have
// settled, successful or not
pub struct FragmentLoader {
    slots: Vec<FragmentSlot>,
}

impl FragmentLoader {
    pub fn new(slots: Vec<FragmentSlot>) -> Self {
        Self { slots }
    }

    // Fan-out/fan-in: one future per slot, all polled together, each
    // depositing its payload as it lands. A failed or undecodable fragment is
    // logged and skipped; the others proceed. No retries, no timeout.
    pub async fn load_all(&self, fetcher: &dyn FragmentFetcher) -> FragmentSet {
        let set = FragmentSet::default();

        let fetches = self.slots.iter().map(|slot| {
            let set = &set;
            async move {
                match fetcher.fetch(&slot.path).await {
                    Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                        Ok(html) => {
                            debug!("loaded fragment {} ({} bytes)", slot.path, html.len());
                            set.insert(slot.placeholder.clone(), html);
                        }
                        Err(_) => {
                            let err = FragmentError::InvalidUtf8 {
                                path: slot.path.clone(),
                            };
                            error!("Error loading {}: {}", slot.path, err);
                        }
                    },
                    Err(err) => {
                        error!("Error loading {}: {}", slot.path, err);
                    }
                }
            }
        });

        join_all(fetches).await;
        set
    }
}


#[cfg(test)]
mod tests {
    use super::mock_server::MockFragmentServer;
    use super::*;
    use crate::page::MemoryPage;

    #[tokio::test]
    async fn test_all_fragments_load_and_apply() {
        let server = MockFragmentServer::with_site_defaults();
        let loader = FragmentLoader::new(FragmentSlot::site_defaults());

        let set = loader.load_all(&server).await;
        assert_eq!(set.len(), 6);

        let mut page = MemoryPage::standard();
        set.apply(&mut page);
        assert_eq!(
            page.fragment(ports::NAVBAR_PLACEHOLDER),
            Some("<div data-fragment=\"components/Navbar.html\"></div>")
        );
        assert!(page.fragment(ports::FOOTER_PLACEHOLDER).is_some());
    }

    #[tokio::test]
    async fn test_one_failure_leaves_only_its_placeholder_empty() {
        let server = MockFragmentServer::with_site_defaults();
        server.fail_with_status("components/Hero.html", 500);
        let loader = FragmentLoader::new(FragmentSlot::site_defaults());

        let set = loader.load_all(&server).await;

        // Every fetch was still issued; only the failed slot is missing
        assert_eq!(server.request_count(), 6);
        assert_eq!(set.len(), 5);
        assert!(set.get(ports::HERO_PLACEHOLDER).is_none());
        assert!(set.get(ports::NAVBAR_PLACEHOLDER).is_some());

        let mut page = MemoryPage::standard();
        set.apply(&mut page);
        assert!(page.fragment(ports::HERO_PLACEHOLDER).is_none());
        assert!(page.fragment(ports::DESTINATIONS_PLACEHOLDER).is_some());
    }

    #[tokio::test]
    async fn test_undecodable_fragment_is_skipped() {
        let server = MockFragmentServer::with_site_defaults();
        server.serve_bytes(
            "components/Tips.html",
            Bytes::from_static(&[0xff, 0xfe, 0x00, 0x9f]),
        );
        let loader = FragmentLoader::new(FragmentSlot::site_defaults());

        let set = loader.load_all(&server).await;
        assert_eq!(set.len(), 5);
        assert!(set.get(ports::TIPS_PLACEHOLDER).is_none());
    }

    #[test]
    fn test_missing_fragment_is_a_404() {
        // block_on keeps this usable from non-async callers too
        let server = MockFragmentServer::new();
        let result = tokio_test::block_on(server.fetch("components/Navbar.html"));
        assert!(
            matches!(result, Err(FragmentError::BadStatus { status: 404, .. })),
            "expected a 404, got {:?}",
            result
        );
    }

    #[test]
    fn test_default_slots_cover_the_landing_page() {
        let slots = FragmentSlot::site_defaults();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].placeholder, ports::NAVBAR_PLACEHOLDER);
        assert_eq!(slots[0].path, "components/Navbar.html");
        assert_eq!(slots[5].placeholder, ports::FOOTER_PLACEHOLDER);
    }

    #[test]
    fn test_empty_loader_yields_empty_set() {
        let server = MockFragmentServer::new();
        let loader = FragmentLoader::new(Vec::new());
        let set = tokio_test::block_on(loader.load_all(&server));
        assert!(set.is_empty());
        assert_eq!(server.request_count(), 0);
    }
}
