use actix_web::cookie::Key;
use actix_web::{
    App, HttpResponse, HttpServer,
    http::{StatusCode, header},
    test as actix_test, web,
};
use serde_json::json;
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use workshop_customers::forms::customer::{DOCUMENT_LENGTH_HELP, NAME_HELP};
use workshop_customers::models::config::ServerConfig;
use workshop_customers::repository::HttpRepository;
use workshop_customers::routes::api::api_v1_hints;
use workshop_customers::routes::customers::{save_customer_form, show_customers};
use workshop_customers::routes::{alert_level_to_str, redirect};
use workshop_customers::services::customers::{LOAD_FAILED_MESSAGE, SAVE_FAILED_MESSAGE};

// Nothing listens on the discard port, so every backend call is refused.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        templates_dir: "templates/**/*".to_string(),
        assets_dir: "assets".to_string(),
        secret: "0".repeat(64),
        backend_url: UNREACHABLE_BACKEND.to_string(),
        default_page_size: 10,
        reset_page_on_filter_submit: false,
    }
}

fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::from(&[0u8; 64][..])).build();
    FlashMessagesFramework::builder(store).build()
}

async fn customer_page() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "content": [{
            "id": 21,
            "name": "Caio Prado",
            "document": "12345678909",
            "phone": "11987654321",
            "email": "caio@oficina.com"
        }],
        "number": 2,
        "totalPages": 30,
        "totalElements": 300
    }))
}

/// Serves a fixed customer page on an ephemeral port and returns its base URL.
fn start_backend() -> String {
    let server = HttpServer::new(|| {
        App::new().route("/api/v1/customer", web::get().to(customer_page))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let address = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{address}")
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn redirect_uses_see_other() {
    let resp = redirect("/customers?page=1&size=10");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/customers?page=1&size=10"
    );
}

#[actix_web::test]
async fn hints_report_short_document() {
    let app = actix_test::init_service(App::new().service(web::scope("/api").service(api_v1_hints))).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/hints?field=document&value=1234")
        .to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], DOCUMENT_LENGTH_HELP);
}

#[actix_web::test]
async fn hints_accept_cnpj_length() {
    let app = actix_test::init_service(App::new().service(web::scope("/api").service(api_v1_hints))).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/hints?field=document&value=12.345.678%2F0001-95")
        .to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["valid"], true);
    assert!(body["message"].is_null());
}

#[actix_web::test]
async fn hints_reject_unknown_field() {
    let app = actix_test::init_service(App::new().service(web::scope("/api").service(api_v1_hints))).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/hints?field=address&value=x")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn listing_renders_load_error_when_backend_is_down() {
    let config = server_config();
    let tera = Tera::new(&config.templates_dir).unwrap();
    let app = actix_test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(show_customers)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(HttpRepository::new(&config.backend_url)))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/customers?page=&size=20&name=Ana&action=filter")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(LOAD_FAILED_MESSAGE));
    assert!(body.contains("value=\"Ana\""));
}

#[actix_web::test]
async fn invalid_name_reopens_form_without_alert() {
    let config = server_config();
    let tera = Tera::new(&config.templates_dir).unwrap();
    let app = actix_test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(save_customer_form)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(HttpRepository::new(&config.backend_url)))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/customers/save")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(
            "name=Ana+2&document=12345678909&phone=11987654321&email=ana%40oficina.com&back=page%3D0%26size%3D10",
        )
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(NAME_HELP));
    assert!(body.contains("value=\"Ana 2\""));
    assert!(!body.contains(SAVE_FAILED_MESSAGE));
}

#[actix_web::test]
async fn backend_failure_keeps_form_open_with_alert() {
    let config = server_config();
    let tera = Tera::new(&config.templates_dir).unwrap();
    let app = actix_test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(save_customer_form)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(HttpRepository::new(&config.backend_url)))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/customers/save")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(
            "id=7&name=Ana+Souza&document=123.456.789-09&phone=%2811%29+98765-4321&email=ana%40oficina.com&back=",
        )
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(SAVE_FAILED_MESSAGE));
    assert!(body.contains("Editar cliente"));
    assert!(body.contains("name=\"id\" value=\"7\""));
}

#[actix_web::test]
async fn listing_renders_rows_and_edge_page_links() {
    let config = ServerConfig {
        backend_url: start_backend(),
        ..server_config()
    };
    let tera = Tera::new(&config.templates_dir).unwrap();
    let app = actix_test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(show_customers)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(HttpRepository::new(&config.backend_url)))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/customers?action=page&page=2&size=10")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<td>21</td>"));
    assert!(body.contains("(11) 98765-4321"));
    assert!(body.contains("21–21 de 300"));
    assert!(body.contains(r#"class="first" href="/customers?size=10&action=page&page=0""#));
    assert!(body.contains(r#"class="last" href="/customers?size=10&action=page&page=29""#));
}

#[actix_web::test]
async fn out_of_range_page_renders_instead_of_failing() {
    let config = server_config();
    let tera = Tera::new(&config.templates_dir).unwrap();
    let app = actix_test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(show_customers)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(HttpRepository::new(&config.backend_url)))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/customers?action=page&page=18446744073709551615")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
