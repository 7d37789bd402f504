//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::services::customers::ListingSettings;
use crate::state::listing::{DEFAULT_PAGE_SIZE, FilterSubmitPolicy};

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Key material for signing the flash message cookies (at least 64 bytes).
    pub secret: String,
    /// Base URL of the customer REST backend.
    pub backend_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Return to the first page when filters are submitted.
    #[serde(default)]
    pub reset_page_on_filter_submit: bool,
}

impl ServerConfig {
    pub fn listing_settings(&self) -> ListingSettings {
        ListingSettings {
            policy: if self.reset_page_on_filter_submit {
                FilterSubmitPolicy::ResetToFirst
            } else {
                FilterSubmitPolicy::KeepPage
            },
            default_page_size: self.default_page_size.max(1),
        }
    }
}
