//! HTTP transport for the ratings site.
//!
//! The site serves plain HTML to browsers, so requests carry a
//! conventional browser User-Agent and Accept header. One attempt per
//! request; failures surface through the fetcher's result, never as a
//! retry.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::{OverlayConfig, ACCEPT_HTML};

use super::fetcher::{FetchedPage, PageSource};

/// reqwest-backed page source.
#[derive(Clone)]
pub struct AotyClient {
    client: Client,
}

impl AotyClient {
    pub fn new(config: &OverlayConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for AotyClient {
    async fn get_html(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchedPage { status, body })
    }
}
