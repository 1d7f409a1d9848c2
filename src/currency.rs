// Currency state and price formatting
// Prices are authored in pesos, shown in pesos by default, and can be flipped
// to US dollars site-wide; this module owns that state and the two conversions

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Marker substrings that identify an already-converted display string. The
// detection is plain substring presence, which is how the site has always
// behaved; inputs using other symbol placements are not supported.
const PESO_MARKER: &str = "₱";
const DOLLAR_MARKER: &str = "US$";

// Error types for currency handling
#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Exchange rate must be a positive finite number, got {0}")]
    InvalidRate(f64),
}

// Display currency for the whole site. Php is the local default, Usd the
// foreign alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Php,
    Usd,
}

impl Currency {
    // The other currency of the pair
    pub fn flipped(self) -> Self {
        match self {
            Currency::Php => Currency::Usd,
            Currency::Usd => Currency::Php,
        }
    }

    // Label shown on the currency toggle control
    pub fn toggle_label(self) -> &'static str {
        match self {
            Currency::Php => "PHP ₱",
            Currency::Usd => "USD $",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Php
    }
}

// USD -> PHP conversion factor, fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(usd_to_php: f64) -> Result<Self, CurrencyError> {
        if !usd_to_php.is_finite() || usd_to_php <= 0.0 {
            return Err(CurrencyError::InvalidRate(usd_to_php));
        }
        Ok(Self(usd_to_php))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ExchangeRate {
    // The pegged rate the marketing site quotes with
    fn default() -> Self {
        Self(59.25)
    }
}

// Shared holder for the current display currency. Clones hand out the same
// underlying state, so the engine and any host-side observer stay in sync.
// All mutation happens on the single event thread; the lock is only there to
// make sharing the handle cheap.
#[derive(Debug, Clone)]
pub struct CurrencyState {
    current: Arc<RwLock<Currency>>,
}

impl CurrencyState {
    pub fn new(initial: Currency) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Currency {
        *self.current.read()
    }

    pub fn set(&self, currency: Currency) {
        *self.current.write() = currency;
    }

    // Flips Php <-> Usd and returns the new value
    pub fn toggle(&self) -> Currency {
        let mut current = self.current.write();
        *current = current.flipped();
        *current
    }
}

impl Default for CurrencyState {
    fn default() -> Self {
        Self::new(Currency::Php)
    }
}

// Converts raw price strings between the two display currencies
#[derive(Debug, Clone, Copy)]
pub struct PriceFormatter {
    rate: ExchangeRate,
}

impl PriceFormatter {
    pub fn new(rate: ExchangeRate) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    // Formats a raw catalog price for the requested currency.
    //
    // Input may be a bare number ("1500"), a peso string ("₱1,500") or a
    // dollar string ("US$ 25.32"). A string already marked for the target
    // currency is returned untouched, so repeated re-renders cannot convert
    // the same text twice. Empty or non-numeric input yields an empty string.
    pub fn format(&self, raw: &str, currency: Currency) -> String {
        if raw.is_empty() {
            return String::new();
        }

        match currency {
            Currency::Php => {
                if raw.contains(PESO_MARKER) {
                    return raw.to_string();
                }
                let magnitude = match numeric_magnitude(raw) {
                    Some(value) => value,
                    None => return String::new(),
                };
                let pesos = (magnitude * self.rate.get()).round() as i64;
                format!("{}{}", PESO_MARKER, group_thousands(pesos))
            }
            Currency::Usd => {
                if raw.contains(DOLLAR_MARKER) {
                    return raw.to_string();
                }
                let magnitude = match numeric_magnitude(raw) {
                    Some(value) => value,
                    None => return String::new(),
                };
                let dollars = (magnitude / self.rate.get() * 100.0).round() / 100.0;
                format!("{} {:.2}", DOLLAR_MARKER, dollars)
            }
        }
    }

    // Formats a static price node whose raw value is stored in US dollars.
    // The dollar branch prints the stored value as-is ("$50", "$47.5") and
    // must not divide by the rate again.
    pub fn format_usd_value(&self, usd: f64, currency: Currency) -> String {
        match currency {
            Currency::Php => {
                let pesos = (usd * self.rate.get()).round() as i64;
                format!("{}{}", PESO_MARKER, group_thousands(pesos))
            }
            Currency::Usd => format!("${}", usd),
        }
    }
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self::new(ExchangeRate::default())
    }
}

// Extracts the numeric magnitude of a price string: every character other
// than ASCII digits and '.' is dropped, then the longest leading valid
// decimal is parsed ("₱1,400" -> 1400, "1.2.3" -> 1.2). Returns None when
// nothing numeric remains.
fn numeric_magnitude(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, ch) in stripped.char_indices() {
        if ch == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = i + 1;
    }

    if !seen_digit {
        return None;
    }
    stripped[..end].parse().ok()
}

// Renders a whole-peso amount with ',' thousands separators
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
