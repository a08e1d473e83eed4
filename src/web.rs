use std::sync::Arc;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::aggregate::{collect_placements, search, SearchQuery};
use crate::config::Settings;
use crate::counter::{current_visits, record_visit, visit_label, CounterStore};
use crate::display::html::{self, Chrome};
use crate::display::view::{
    AnnouncementsView, CompanyTarget, CompanyView, Layout, PlacementsView, ScheduleView, SearchView,
};
use crate::display::write_placements_csv;
use crate::error::SearchError;
use crate::loader::{load_company, load_dashboard, load_day_schedule, log_unavailable};
use crate::model::{DashboardSnapshot, Day, DayFilter, DaySchedule, PlacementRecord};
use crate::nav::{self, Action, Effect, Page, PageName, Transition};
use crate::source::DataSource;

const VIEWPORT_HEADERS: [&str; 2] = ["Sec-CH-Viewport-Width", "Viewport-Width"];

// Snapshots are replaced wholesale on every reload, never merged
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub counter: Arc<dyn CounterStore>,
    pub settings: Settings,
    pub dashboard: Mutex<Option<DashboardSnapshot>>,
    pub placements: Mutex<Option<Vec<PlacementRecord>>>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, counter: Arc<dyn CounterStore>, settings: Settings) -> Self {
        AppState {
            source,
            counter,
            settings,
            dashboard: Mutex::new(None),
            placements: Mutex::new(None),
        }
    }

    /// A failed read keeps the previous snapshot.
    pub async fn reload_dashboard(&self) -> Option<DashboardSnapshot> {
        match load_dashboard(self.source.as_ref()).await {
            Ok(snapshot) => {
                *self.dashboard.lock().await = Some(snapshot.clone());
                Some(snapshot)
            }
            Err(e) => {
                log_unavailable(&e);
                self.dashboard.lock().await.clone()
            }
        }
    }

    pub async fn dashboard(&self) -> Option<DashboardSnapshot> {
        let cached = self.dashboard.lock().await.clone();
        match cached {
            Some(snapshot) => Some(snapshot),
            None => self.reload_dashboard().await,
        }
    }

    pub async fn reload_placements(&self) -> Vec<PlacementRecord> {
        let all = collect_placements(self.source.as_ref()).await;
        *self.placements.lock().await = Some(all.clone());
        all
    }

    pub async fn placements(&self) -> Vec<PlacementRecord> {
        let cached = self.placements.lock().await.clone();
        match cached {
            Some(all) => all,
            None => self.reload_placements().await,
        }
    }

    pub async fn refresh(&self) {
        self.reload_dashboard().await;
        let placed = self.reload_placements().await;
        tracing::debug!("refreshed snapshots: {} placements", placed.len());
    }
}

#[derive(Deserialize)]
pub struct LayoutQuery {
    width: Option<u32>,
}

#[derive(Deserialize)]
pub struct CompanyQuery {
    name: Option<String>,
    section: Option<String>,
}

#[derive(Deserialize)]
pub struct PlacementsQuery {
    day: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    roll: Option<String>,
    day: Option<String>,
}

fn error_json(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message }))
}

fn invalid_day() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"error": "Invalid day"}))
}

/// Explicit `?width=` first, then client-hint headers.
fn viewport_width(req: &HttpRequest, explicit: Option<u32>) -> Option<u32> {
    explicit.or_else(|| {
        VIEWPORT_HEADERS.iter().find_map(|name| {
            req.headers()
                .get(*name)?
                .to_str()
                .ok()?
                .trim()
                .parse::<f64>()
                .ok()
                .map(|w| w as u32)
        })
    })
}

fn parse_filter(day: Option<&str>) -> Result<Option<DayFilter>, String> {
    day.map(str::parse::<DayFilter>).transpose()
}

fn company_transition(day: Day, sheet: String, name: String, section: Option<String>) -> Transition {
    let on_day = nav::reduce(&nav::AppState::default(), Action::Navigate(PageName::Day(day))).state;
    let t = nav::reduce(&on_day, Action::OpenCompany { day, sheet, name });
    match section {
        Some(section) => nav::reduce(&t.state, Action::SelectSection(section)),
        None => t,
    }
}

fn placements_transition(filter: Option<DayFilter>) -> Transition {
    let t = nav::reduce(&nav::AppState::default(), Action::Navigate(PageName::Placements));
    match filter {
        Some(filter) => nav::reduce(&t.state, Action::FilterPlacements(filter)),
        None => t,
    }
}

async fn schedule_view(state: &AppState, day: Day, layout: Layout) -> Option<ScheduleView> {
    match load_day_schedule(state.source.as_ref(), day).await {
        Ok(schedule) => Some(ScheduleView::build(day, &schedule, layout)),
        Err(e) if e.is_not_yet_available() => {
            log_unavailable(&e);
            Some(ScheduleView::build(day, &DaySchedule::default(), layout))
        }
        Err(e) => {
            log_unavailable(&e);
            None
        }
    }
}

async fn company_view(state: &AppState, t: &Transition) -> Option<CompanyView> {
    let Page::Company { day, sheet, name } = &t.state.page else {
        return None;
    };
    match load_company(state.source.as_ref(), *day, sheet).await {
        Ok(detail) => {
            let target = CompanyTarget {
                day: *day,
                sheet_name: sheet.clone(),
                company_name: name.clone(),
            };
            Some(CompanyView::build(target, &detail.sections, t.state.company_section.as_deref()))
        }
        Err(e) => {
            log_unavailable(&e);
            None
        }
    }
}

async fn placements_view(state: &AppState, t: &Transition) -> PlacementsView {
    // entering the page re-reads every day; filtering reuses what is loaded
    let all = match t.effect {
        Some(Effect::LoadPlacements) => state.reload_placements().await,
        _ => state.placements().await,
    };
    PlacementsView::build(&all, t.state.placement_filter)
}

/// Loads what the page of `t` needs and renders its body.
async fn render(state: &AppState, t: &Transition, layout: Layout) -> (String, String) {
    match &t.state.page {
        Page::Home => {
            let snapshot = state.dashboard().await;
            ("Placement Dashboard".to_string(), html::home(&AnnouncementsView::build(snapshot.as_ref())))
        }
        Page::Day(day) => {
            let body = match schedule_view(state, *day, layout).await {
                Some(view) => html::schedule(&view),
                None => "<p>Error loading schedule.</p>".to_string(),
            };
            (format!("Day {} Schedule", day), body)
        }
        Page::Company { day, name, .. } => {
            let body = match company_view(state, t).await {
                Some(view) => html::company(&view),
                None => format!(
                    r#"<a class="back-btn" href="/day/{}">← Back</a><p>Error loading company details. Please try again.</p>"#,
                    day
                ),
            };
            (name.clone(), body)
        }
        Page::Placements => ("Placements".to_string(), html::placements(&placements_view(state, t).await)),
    }
}

/// Wraps `body` in the page chrome. `page` is `None` for pages outside the
/// navigation bar.
async fn page_response(state: &AppState, page: Option<&Page>, title: &str, body: &str) -> HttpResponse {
    // the home page is the entry point, so it is the one that counts a visit
    let count = match page {
        Some(Page::Home) => record_visit(state.counter.as_ref()).await,
        _ => current_visits(state.counter.as_ref()).await,
    };
    let visits = visit_label(count);
    let rendered_at = chrono::Local::now().format("%d %b %Y %H:%M:%S").to_string();
    let search_day = match page {
        Some(Page::Day(d)) | Some(Page::Company { day: d, .. }) => Some(*d),
        _ => None,
    };
    let chrome = Chrome {
        active: page.and_then(Page::nav_name),
        visits: &visits,
        refresh_secs: state.settings.refresh.as_secs(),
        rendered_at: &rendered_at,
        search_day,
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header(("Accept-CH", VIEWPORT_HEADERS.join(", ")))
        .body(html::page(title, &chrome, body))
}

async fn run_search(state: &AppState, roll: &str, day: Option<&str>) -> Result<SearchView, SearchError> {
    let query = SearchQuery::parse(roll, day)?;
    let result = search(state.source.as_ref(), &query).await?;
    Ok(SearchView::build(&result))
}

// Home page
async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    let t = nav::reduce(&nav::AppState::default(), Action::Navigate(PageName::Home));
    let (title, body) = render(&state, &t, Layout::Table).await;
    Ok(page_response(&state, Some(&t.state.page), &title, &body).await)
}

async fn day_page(
    req: HttpRequest,
    day: web::Path<String>,
    query: web::Query<LayoutQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Ok(day) = day.parse::<Day>() else {
        return Ok(invalid_day());
    };
    let t = nav::reduce(&nav::AppState::default(), Action::Navigate(PageName::Day(day)));
    let layout = Layout::with_breakpoint(viewport_width(&req, query.width), state.settings.table_breakpoint);
    let (title, body) = render(&state, &t, layout).await;
    Ok(page_response(&state, Some(&t.state.page), &title, &body).await)
}

async fn company_page(
    path: web::Path<(String, String)>,
    query: web::Query<CompanyQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, sheet) = path.into_inner();
    let Ok(day) = day.parse::<Day>() else {
        return Ok(invalid_day());
    };
    let query = query.into_inner();
    let name = query.name.unwrap_or_else(|| sheet.clone());
    let t = company_transition(day, sheet, name, query.section);
    let (title, body) = render(&state, &t, Layout::Table).await;
    Ok(page_response(&state, Some(&t.state.page), &title, &body).await)
}

// Section switch: only the content region, the tab bar stays as rendered
async fn company_content(
    path: web::Path<(String, String)>,
    query: web::Query<CompanyQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, sheet) = path.into_inner();
    let Ok(day) = day.parse::<Day>() else {
        return Ok(invalid_day());
    };
    let query = query.into_inner();
    let name = query.name.unwrap_or_else(|| sheet.clone());
    let t = company_transition(day, sheet, name, query.section);

    match company_view(&state, &t).await {
        Some(view) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html::company_content(&view.content))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Company details not available"}))),
    }
}

async fn placements_page(query: web::Query<PlacementsQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let filter = match parse_filter(query.day.as_deref()) {
        Ok(f) => f,
        Err(e) => return Ok(error_json(actix_web::http::StatusCode::BAD_REQUEST, &e)),
    };
    let t = placements_transition(filter);
    let (title, body) = render(&state, &t, Layout::Table).await;
    Ok(page_response(&state, Some(&t.state.page), &title, &body).await)
}

async fn placements_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let all = state.placements().await;
    let mut body = Vec::new();
    write_placements_csv(&all, &mut body)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to write CSV: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"placements.csv\""))
        .body(body))
}

async fn search_page(query: web::Query<SearchParams>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let query = query.into_inner();
    let selected_day = query.day.as_deref().and_then(|d| d.parse::<Day>().ok());
    let roll = query.roll.clone().unwrap_or_default();

    let mut body = html::search_form(selected_day, &roll);
    if query.roll.is_some() || query.day.is_some() {
        let view = run_search(&state, &roll, query.day.as_deref()).await.unwrap_or_else(|e| {
            tracing::warn!("search for {:?} failed: {}", roll, e);
            SearchView::error(e.user_message())
        });
        body.push_str(r#"<div id="search-results">"#);
        body.push_str(&html::search(&view));
        body.push_str("</div>");
    }

    Ok(page_response(&state, None, "Search", &body).await)
}

async fn api_schedule(
    req: HttpRequest,
    day: web::Path<String>,
    query: web::Query<LayoutQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Ok(day) = day.parse::<Day>() else {
        return Ok(invalid_day());
    };
    let layout = Layout::with_breakpoint(viewport_width(&req, query.width), state.settings.table_breakpoint);
    match schedule_view(&state, day, layout).await {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

async fn api_placements(query: web::Query<PlacementsQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let filter = match parse_filter(query.day.as_deref()) {
        Ok(f) => f,
        Err(e) => return Ok(error_json(actix_web::http::StatusCode::BAD_REQUEST, &e)),
    };
    let t = placements_transition(filter);
    Ok(HttpResponse::Ok().json(placements_view(&state, &t).await))
}

async fn api_search(query: web::Query<SearchParams>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let roll = query.roll.clone().unwrap_or_default();
    let parsed = match SearchQuery::parse(&roll, query.day.as_deref()) {
        Ok(q) => q,
        Err(e) => return Ok(error_json(actix_web::http::StatusCode::BAD_REQUEST, &e.user_message())),
    };
    match search(state.source.as_ref(), &parsed).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            tracing::warn!("search for {:?} failed: {}", parsed.roll_no, e);
            Ok(error_json(actix_web::http::StatusCode::BAD_GATEWAY, &e.user_message()))
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/day/{day}", web::get().to(day_page))
        .route("/day/{day}/company/{sheet}", web::get().to(company_page))
        .route("/day/{day}/company/{sheet}/content", web::get().to(company_content))
        .route("/placements", web::get().to(placements_page))
        .route("/placements.csv", web::get().to(placements_csv))
        .route("/search", web::get().to(search_page))
        .route("/api/schedule/{day}", web::get().to(api_schedule))
        .route("/api/placements", web::get().to(api_placements))
        .route("/api/search", web::get().to(api_search));
}

/// Reloads the dashboard and placement snapshots on a fixed period.
pub fn spawn_refresher(state: web::Data<AppState>) -> tokio::task::JoinHandle<()> {
    let period = state.settings.refresh;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            state.refresh().await;
        }
    })
}

pub async fn start_server(
    settings: Settings,
    source: Arc<dyn DataSource>,
    counter: Arc<dyn CounterStore>,
) -> std::io::Result<()> {
    let port = settings.port;
    let data_dir = source.local_root().map(|root| root.join("data"));
    let app_state = web::Data::new(AppState::new(source, counter, settings));
    spawn_refresher(app_state.clone());

    tracing::info!("serving data from {}", app_state.source.describe());
    tracing::info!("listening on http://localhost:{}", port);

    HttpServer::new(move || {
        let data_dir = data_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
            .configure(move |cfg| {
                if let Some(dir) = data_dir {
                    cfg.service(Files::new("/data", dir));
                }
            })
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
