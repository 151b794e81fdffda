use crate::config::SourceConfig;
use booster_core::{Card, CardSource, LookupError};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::thread;
use std::time::Instant;
use tracing::trace;

/// Blocking client for the `cards/random` endpoint.
#[derive(Debug)]
pub struct ScryfallClient {
    http: Client,
    config: SourceConfig,
    last_request: Option<Instant>,
}

impl ScryfallClient {
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            config,
            last_request: None,
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.config.min_interval {
                thread::sleep(self.config.min_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

impl CardSource for ScryfallClient {
    fn random_card(&mut self, search: &str) -> Result<Card, LookupError> {
        self.throttle();
        let url = self.config.random_card_url();
        trace!(%url, %search, "requesting random card");
        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("q", search)])
            .send()
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            trace!(status = status.as_u16(), "random card request rejected");
            return Err(LookupError::Status(status.as_u16()));
        }
        let text = resp
            .text()
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        let card: Card =
            serde_json::from_str(&text).map_err(|err| LookupError::Decode(err.to_string()))?;
        trace!(name = %card.name, set = %card.set, "random card received");
        Ok(card)
    }
}
