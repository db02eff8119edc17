//! Portfolio Site
//!
//! The behavior layer of a personal portfolio website: a typewriter-animated
//! terminal widget, a scroll-to-top button and a floating chatbot that talks
//! to a remote chat endpoint.
//!
//! # Architecture
//!
//! Every widget is a headless component driving a surface trait that stands
//! for the page fragment it owns. Hosts implement those traits:
//!
//! - **HTML**: records state and renders escaped markup for the home page
//! - **Console**: writes to any `std::io::Write` for the CLI front ends
//!
//! # Modules
//!
//! - [`terminal`]: typewriter animator and its surfaces
//! - [`scroll`]: scroll-to-top controller
//! - [`chat`]: chat widget, formatter, renderer and HTTP transport
//! - [`skills`], [`content`]: portfolio data
//! - [`page`], [`server`]: server-rendered home page and its Axum host
//! - [`commands`]: terminal front ends

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::format_push_string)]
#![allow(clippy::unused_async)]

pub mod chat;
pub mod commands;
pub mod config;
pub mod content;
pub mod markup;
pub mod page;
pub mod scroll;
pub mod server;
pub mod skills;
pub mod terminal;

use crate::chat::{ChatError, HttpChatTransport};
use crate::config::AppConfig;

use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// Transport behind the page's chat form, if an endpoint is configured
    pub chat: Option<HttpChatTransport>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ChatError> {
        let chat = config.chat.transport()?;
        Ok(Self { config, chat })
    }
}
