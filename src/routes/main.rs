use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::routes::{base_context, collect_alerts, render_template};

#[get("/")]
/// Landing page linking to the customer list.
pub async fn show_home(flash_messages: IncomingFlashMessages, tera: web::Data<Tera>) -> impl Responder {
    let alerts = collect_alerts(&flash_messages);
    let context = base_context(&alerts, "home");
    render_template(&tera, "main/index.html", &context)
}
