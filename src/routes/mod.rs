//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

pub mod api;
pub mod customers;
pub mod main;

/// Notification rendered at the top of a page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: &'static str,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: alert_level_to_str(&Level::Error),
        }
    }
}

/// Maps a flash message level to the CSS class of the alert box.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flash messages of the request turned into alerts.
pub fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<Alert> {
    flash_messages
        .iter()
        .map(|f| Alert {
            message: f.content().to_string(),
            level: alert_level_to_str(&f.level()),
        })
        .collect()
}

/// Context shared by every page: alerts and the active navigation entry.
pub fn base_context(alerts: &[Alert], current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", alerts);
    context.insert("current_page", current_page);
    context
}
