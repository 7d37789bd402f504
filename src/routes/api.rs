use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::forms::customer::{CustomerField, field_hint};

#[derive(Deserialize)]
struct ApiV1HintsQueryParams {
    field: String,
    #[serde(default)]
    value: String,
}

#[get("/v1/hints")]
/// Live helper state of a single form field while the user types.
pub async fn api_v1_hints(params: web::Query<ApiV1HintsQueryParams>) -> impl Responder {
    match params.field.parse::<CustomerField>() {
        Ok(field) => HttpResponse::Ok().json(field_hint(field, &params.value)),
        Err(e) => {
            log::warn!("Rejected hint request: {e}");
            HttpResponse::BadRequest().finish()
        }
    }
}
