// Peripheral page widgets: hero slider, navigation tracking, booking modal,
// reveal animations, and the map configuration. Each one is independent state
// driven by discrete host events; none of them knows about the others.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One hero thumbnail as shown in the strip under the hero image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroThumb {
    pub src: String,
    pub active: bool,
}

// Everything the page needs to draw the hero after a slide change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub image: String,
    pub thumbs: Vec<HeroThumb>,
}

// Thumbnail-driven hero image rotation. Manual clicks and the auto-advance
// interval share the one index; the host delivers both as ordinary events, so
// they never overlap.
#[derive(Debug, Clone)]
pub struct HeroSlider {
    thumbs: Vec<String>,
    index: usize,
}

impl HeroSlider {
    // None when there is nothing to rotate through
    pub fn new(thumbs: Vec<String>) -> Option<Self> {
        if thumbs.is_empty() {
            return None;
        }
        Some(Self { thumbs, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    // Manual thumbnail click. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> Option<HeroView> {
        if index >= self.thumbs.len() {
            return None;
        }
        self.index = index;
        Some(self.view())
    }

    // The interval tick; wraps back to the first thumbnail
    pub fn advance(&mut self) -> HeroView {
        self.index = (self.index + 1) % self.thumbs.len();
        self.view()
    }

    pub fn view(&self) -> HeroView {
        HeroView {
            image: self.thumbs[self.index].clone(),
            thumbs: self
                .thumbs
                .iter()
                .enumerate()
                .map(|(i, src)| HeroThumb {
                    src: src.clone(),
                    active: i == self.index,
                })
                .collect(),
        }
    }
}

// Navbar state for one scroll position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavView {
    pub condensed: bool,
    pub active_section: Option<String>,
    pub highlighted: Vec<String>,
}

// Mobile menu state plus the scroll-driven navbar behavior
#[derive(Debug, Default)]
pub struct NavTracker {
    menu_open: bool,
}

impl NavTracker {
    // Flips the mobile menu and returns the new state. The open flag doubles
    // as the hamburger-to-X animation state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    // Any nav-link click closes the menu
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    // Computes the navbar view for a scroll position. The navbar condenses
    // past 50px. The active section is the last one whose top sits within
    // 150px above the scroll position, except within 10px of the page bottom
    // where the last section wins outright. A link is highlighted when its
    // href contains the active section id and that id is non-empty.
    pub fn on_scroll(
        &self,
        info: crate::page::ScrollInfo,
        sections: &[crate::page::SectionAnchor],
        nav_links: &[String],
    ) -> NavView {
        let condensed = info.y > 50.0;

        let at_bottom = info.y + info.viewport_height >= info.page_height - 10.0;
        let active_section = if sections.is_empty() {
            None
        } else if at_bottom {
            sections.last().map(|section| section.id.clone())
        } else {
            sections
                .iter()
                .filter(|section| section.top <= info.y + 150.0)
                .last()
                .map(|section| section.id.clone())
        };

        let highlighted = match &active_section {
            Some(id) if !id.is_empty() => nav_links
                .iter()
                .filter(|href| href.contains(id.as_str()))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };

        NavView {
            condensed,
            active_section,
            highlighted,
        }
    }
}

// Which of the modal's two sub-panels is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPanel {
    Form,
    Success,
}

impl Default for ModalPanel {
    fn default() -> Self {
        ModalPanel::Form
    }
}

// The booking inquiry as filled in by the visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub destination: String,
    pub message: String,
}

// A submitted inquiry, stamped when it came in. Retained until the booking
// collaborator drains them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquirySubmission {
    pub form: InquiryForm,
    pub submitted_at: DateTime<Utc>,
}

// Inquiry modal state. Opening and closing never reset the sub-panel, so a
// reopened modal still shows Success after a submit.
#[derive(Debug, Default)]
pub struct BookingModal {
    open: bool,
    panel: ModalPanel,
    submissions: Vec<InquirySubmission>,
}

impl BookingModal {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn panel(&self) -> ModalPanel {
        self.panel
    }

    // Records the inquiry and switches to the success panel
    pub fn submit(&mut self, form: InquiryForm) {
        self.panel = ModalPanel::Success;
        self.submissions.push(InquirySubmission {
            form,
            submitted_at: Utc::now(),
        });
    }

    pub fn submissions(&self) -> &[InquirySubmission] {
        &self.submissions
    }

    pub fn drain_submissions(&mut self) -> Vec<InquirySubmission> {
        std::mem::take(&mut self.submissions)
    }
}

// Observer settings handed to the adapter for the scroll reveal animation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

// Per-target visibility bookkeeping for the reveal animation. Targets toggle
// both ways: scrolling back up hides them again.
#[derive(Debug, Default)]
pub struct RevealTracker {
    visible: HashMap<String, bool>,
}

impl RevealTracker {
    // Records an intersection change; returns whether the visibility actually
    // changed for the target
    pub fn update(&mut self, target: &str, intersecting: bool) -> bool {
        let previous = self.visible.insert(target.to_string(), intersecting);
        previous != Some(intersecting)
    }

    pub fn is_visible(&self, target: &str) -> bool {
        self.visible.get(target).copied().unwrap_or(false)
    }

    pub fn tracked(&self) -> usize {
        self.visible.len()
    }
}

// Configuration handed to the external mapping library at wiring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub marker_popup: String,
    pub scroll_wheel_zoom: bool,
}

impl Default for MapConfig {
    // Whole-country view with one welcome marker, wheel zoom off so the page
    // keeps scrolling past the map
    fn default() -> Self {
        Self {
            center: (12.8797, 121.7740),
            zoom: 6,
            tile_url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            marker_popup: "Welcome to the Philippines!".to_string(),
            scroll_wheel_zoom: false,
        }
    }
}
