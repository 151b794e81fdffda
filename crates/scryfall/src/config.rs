use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Gap kept between consecutive requests.
    pub min_interval: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
            user_agent: concat!("booster-sim/", env!("CARGO_PKG_VERSION")).to_string(),
            min_interval: Duration::from_millis(100),
        }
    }
}

impl SourceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub(crate) fn random_card_url(&self) -> String {
        format!("{}/cards/random", self.base_url.trim_end_matches('/'))
    }
}
