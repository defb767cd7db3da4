//! popnote desktop popup
//!
//! A small fixed-size window for jotting down, editing, and deleting short notes.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use popnote_core::config::PopnoteConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "popnote_core=debug,popnote_desktop=debug";

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting popnote...");

    let config = PopnoteConfig::from_env().unwrap_or_else(|error| {
        tracing::error!("Invalid configuration, falling back to defaults: {}", error);
        PopnoteConfig::default()
    });

    let window = WindowBuilder::new()
        .with_title("My Notes")
        .with_inner_size(LogicalSize::new(300.0, 500.0))
        .with_resizable(false);

    dioxus::LaunchBuilder::new()
        .with_cfg(Config::new().with_window(window))
        .with_context(config)
        .launch(app::App);
}
