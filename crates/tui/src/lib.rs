//! # Verdant TUI Library
//!
//! Terminal front end for the Verdant product catalog. The home screen shows
//! the most popular and most sustainable products, opens a detail overlay
//! for a selected product and links to the scan flow.
//!
//! ## Architecture
//!
//! Each screen is a component that handles keys and renders itself. State
//! that must survive navigation lives on [`app::App`]; side effects are
//! requested as `Effect`s and executed by `cmd`.

mod app;
mod cmd;
mod ui;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use verdant_api::{ClientConfig, VerdantClient};
use verdant_util::AppConfig;

use crate::app::SharedCtx;

/// Runs the TUI until the user quits.
///
/// Builds the API client from `config`, selects a theme and hands control to
/// the event loop. The terminal is restored before returning, also on error.
///
/// # Errors
///
/// - the configured base URL is not a valid http(s) URL
/// - terminal setup fails (raw mode, alternate screen)
/// - drawing to the terminal fails
pub async fn run(config: AppConfig) -> Result<()> {
    let client = build_client(&config)?;

    let loaded = ui::theme::load(config.theme.as_deref());
    info!(
        theme = loaded.definition.id,
        base_url = %client.base_url(),
        authenticated = client.has_auth_token(),
        "starting Verdant TUI"
    );

    let ctx = SharedCtx {
        theme: loaded.theme,
        catalog: Arc::new(client),
    };
    ui::runtime::run_app(ctx).await
}

/// API client for the resolved configuration: base URL, timeout and token.
pub fn build_client(config: &AppConfig) -> Result<VerdantClient> {
    let mut client_config = ClientConfig::new(&config.base_url).with_timeout(config.request_timeout());
    if let Some(token) = config.auth_token.as_deref() {
        client_config = client_config.with_auth_token(token);
    }
    VerdantClient::new(client_config).context("failed to create the Verdant API client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_carries_base_url_and_token() {
        let config = AppConfig {
            base_url: "http://192.168.0.141:3000".into(),
            auth_token: Some("abc".into()),
            ..AppConfig::default()
        };
        let client = build_client(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://192.168.0.141:3000/");
        assert!(client.has_auth_token());
    }

    #[test]
    fn build_client_rejects_bad_base_url() {
        let config = AppConfig {
            base_url: "ftp://example.com".into(),
            ..AppConfig::default()
        };
        let error = build_client(&config).unwrap_err();
        assert!(format!("{error:#}").contains("invalid base URL"));
    }
}
