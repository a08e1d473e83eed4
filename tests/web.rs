//! HTTP routes against a fixture data tree.

mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::Value;

use placement_board::config::Settings;
use placement_board::counter::MemoryCounterStore;
use placement_board::web::{routes, AppState};
use placement_board::DataSource;

fn state(source: Arc<dyn DataSource>) -> web::Data<AppState> {
    web::Data::new(AppState::new(source, Arc::new(MemoryCounterStore::default()), Settings::default()))
}

macro_rules! get_text {
    ($app:expr, $uri:expr) => {{
        let resp = test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }};
}

#[actix_web::test]
async fn home_counts_visits() {
    let (_dir, source) = common::seeded();
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let (status, body) = get_text!(app, "/");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hall change for Acme"));
    assert!(body.contains("📣 Carry ID cards"));
    assert!(body.contains("Visits: 1"));

    let (_, body) = get_text!(app, "/");
    assert!(body.contains("Visits: 2"));

    // other pages show the count without adding to it
    let (_, body) = get_text!(app, "/placements");
    assert!(body.contains("Visits: 2"));
}

#[actix_web::test]
async fn day_layout_follows_width() {
    let (_dir, source) = common::seeded();
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let (status, narrow) = get_text!(app, "/day/1?width=500");
    assert_eq!(status, StatusCode::OK);
    assert!(narrow.contains("company-cards"));

    let req = test::TestRequest::get()
        .uri("/day/1")
        .insert_header(("Sec-CH-Viewport-Width", "1024"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("Accept-CH").unwrap(), "Sec-CH-Viewport-Width, Viewport-Width");
    let wide = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(wide.contains("schedule-table"));
    assert!(!wide.contains("company-cards"));

    let (_, unpublished) = get_text!(app, "/day/2");
    assert!(unpublished.contains("Day 2 schedule will be available soon. Please check back later."));
    let (_, missing) = get_text!(app, "/day/3");
    assert!(missing.contains("Day 3 schedule will be available soon."));

    let (status, _) = get_text!(app, "/day/9");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_schedule_shows_error() {
    let (dir, source) = common::seeded();
    common::write_raw(dir.path(), "data/day1-schedule.json", "{");
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let (status, body) = get_text!(app, "/day/1");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error loading schedule."));
}

#[actix_web::test]
async fn company_tabs_and_sections() {
    let (_dir, source) = common::seeded();
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let (status, body) = get_text!(app, "/day/1/company/acme?name=Acme%20Corp");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Acme Corp"));
    // first section listed in the file is shown
    assert!(body.contains("<h3>Second Round Shortlisted</h3>"));
    assert!(body.contains(r#"data-section="registered""#));
    assert!(!body.contains(r#"data-section="selected""#));

    let (_, body) = get_text!(app, "/day/1/company/acme?section=registered");
    assert!(body.contains("<h3>Registered Candidates</h3>"));
    assert!(body.contains("Student R2"));

    let (status, fragment) = get_text!(app, "/day/1/company/acme/content?section=round2");
    assert_eq!(status, StatusCode::OK);
    assert!(fragment.contains("Student R1"));
    assert!(!fragment.contains("company-tabs"));

    let (status, _) = get_text!(app, "/day/1/company/nobody/content");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn placements_filter_and_export() {
    let (_dir, source) = common::seeded();
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/placements?day=2").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["companyName"], "C");
    assert_eq!(rows[0]["day"], 2);

    let req = test::TestRequest::get().uri("/api/placements").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["rows"].as_array().unwrap().len(), 3);

    let (status, _) = get_text!(app, "/placements?day=someday");
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, page) = get_text!(app, "/placements?day=1");
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(r#"<a class="tab-btn active" href="/placements?day=1">"#));

    let (status, csv) = get_text!(app, "/placements.csv");
    assert_eq!(status, StatusCode::OK);
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Day,"));
    assert_eq!(lines.count(), 3);
}

#[actix_web::test]
async fn search_routes() {
    let (_dir, source) = common::seeded();
    let app = test::init_service(App::new().app_data(state(source)).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/search?roll=R1&day=1").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["shortlists"].as_array().unwrap().len(), 2);
    assert_eq!(json["shortlists"][1]["section"], "round2");
    assert_eq!(json["placements"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/search?roll=&day=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Please enter a roll number");

    let (_, body) = get_text!(app, "/search?roll=R1");
    assert!(body.contains("Please select a day"));

    let (_, body) = get_text!(app, "/search?roll=R1&day=1");
    assert!(body.contains("Search Results for R1"));
    assert!(body.contains("Second Round Shortlisted"));

    let (status, form) = get_text!(app, "/search");
    assert_eq!(status, StatusCode::OK);
    assert!(!form.contains("search-results"));
}
