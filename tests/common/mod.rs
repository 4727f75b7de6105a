#![allow(dead_code)]

use std::sync::Arc;

use cinema_client::config::Config;
use cinema_client::AppState;
use wiremock::MockServer;

pub const MEDIA_BASE: &str = "https://media.test/";

pub fn config_for(server: &MockServer) -> Config {
    Config::for_api(format!("{}/api", server.uri()), MEDIA_BASE)
}

pub fn app_for(server: &MockServer) -> Arc<AppState> {
    AppState::new(config_for(server)).unwrap()
}
