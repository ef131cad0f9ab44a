use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_files::Files;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::form::GuestPlayer;
use crate::lineup::{plan_lineup, Lineup, SearchLimits};
use crate::roster::RosterConfig;
use crate::stats::{batting_order, load_game_records, season_totals, BattingSlot, StatRow};

pub struct AppState {
    pub roster: RosterConfig,
    pub games_path: PathBuf,
    pub last_lineup: Mutex<Option<LineupResponse>>,
}

impl AppState {
    pub fn new(roster: RosterConfig, games_path: PathBuf) -> Self {
        AppState {
            roster,
            games_path,
            last_lineup: Mutex::new(None),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LineupForm {
    #[serde(default)]
    pub unavailable: Vec<String>,
    #[serde(default)]
    pub guests: Vec<GuestPlayer>,
    #[serde(default)]
    pub max_nodes: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupResponse {
    pub team: String,
    pub generated_at: DateTime<Local>,
    pub lineup: Lineup,
}

#[derive(Serialize)]
pub struct StatsResponse {
    team: String,
    season: String,
    players: Vec<StatRow>,
    totals: StatRow,
}

#[derive(Serialize)]
pub struct BattingOrderResponse {
    team: String,
    season: String,
    order: Vec<BattingSlot>,
}

fn failure(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({"success": false, "error": message.to_string()})
}

fn lock_poisoned<T>(_: T) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("lineup state is unavailable")
}

// Roster endpoint
async fn get_roster(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.roster))
}

// Lineup generation endpoint
async fn create_lineup(
    form: web::Json<LineupForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let mut request = match state.roster.lineup_request(&form.unavailable, &form.guests) {
        Ok(request) => request,
        Err(e) => return Ok(HttpResponse::BadRequest().json(failure(e))),
    };
    if let Some(max_nodes) = form.max_nodes {
        request.limits = SearchLimits { max_nodes: Some(max_nodes) };
    }

    let lineup = match web::block(move || plan_lineup(&request)).await? {
        Ok(lineup) => lineup,
        Err(e) => {
            log::warn!("lineup request failed: {}", e);
            return Ok(HttpResponse::BadRequest().json(failure(e)));
        }
    };

    let response = LineupResponse {
        team: state.roster.team.clone(),
        generated_at: Local::now(),
        lineup,
    };
    *state.last_lineup.lock().map_err(lock_poisoned)? = Some(response.clone());

    Ok(HttpResponse::Ok().json(response))
}

// Most recent lineup
async fn get_last_lineup(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.last_lineup.lock().map_err(lock_poisoned)?;
    match *last {
        Some(ref response) => Ok(HttpResponse::Ok().json(response)),
        None => Ok(HttpResponse::NotFound().json(failure("No lineup generated yet"))),
    }
}

// Season stats endpoint
async fn get_stats(season: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let season = season.into_inner();
    let team = match load_game_records(&state.games_path)
        .and_then(|records| season_totals(&records, &state.roster.team, &season))
    {
        Ok(team) => team,
        Err(e) => return Ok(HttpResponse::NotFound().json(failure(e))),
    };

    Ok(HttpResponse::Ok().json(StatsResponse {
        team: team.team.clone(),
        season,
        players: team.rows(),
        totals: team.totals().row(),
    }))
}

// Batting order endpoint
async fn get_batting_order(
    season: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let season = season.into_inner();
    let team = match load_game_records(&state.games_path)
        .and_then(|records| season_totals(&records, &state.roster.team, &season))
    {
        Ok(team) => team,
        Err(e) => return Ok(HttpResponse::NotFound().json(failure(e))),
    };

    match batting_order(&team, &[]) {
        Ok(order) => Ok(HttpResponse::Ok().json(BattingOrderResponse {
            team: team.team,
            season,
            order,
        })),
        Err(e) => Ok(HttpResponse::BadRequest().json(failure(e))),
    }
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/roster", web::get().to(get_roster))
        .route("/api/lineup", web::post().to(create_lineup))
        .route("/api/lineup/last", web::get().to(get_last_lineup))
        .service(web::resource("/api/stats/{season}").route(web::get().to(get_stats)))
        .service(web::resource("/api/batting-order/{season}").route(web::get().to(get_batting_order)));
}

pub async fn start_server(port: u16, roster: RosterConfig, games_path: PathBuf) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(roster, games_path));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::DEFAULT_MAX_NODES;
    use actix_web::{http::StatusCode, test};
    use std::io::Write;

    const GAMES: &str = "\
Season,Game,Player,AB,R,1B,2B,3B,HR,RBI,BB,SO,SF,AB_RISP,H_RISP
Fall2025,1,Kevo,4,1,2,0,0,0,1,0,1,0,2,1
Fall2025,1,JD,4,2,1,1,0,1,3,1,0,0,2,1
Fall2025,1,Werth,3,0,1,0,0,0,0,1,1,1,1,0
Fall2025,1,Balavich,4,1,2,1,0,0,2,0,0,0,2,2
Fall2025,1,Stross,3,1,0,0,0,1,1,2,1,0,1,0
Fall2025,1,Dave,3,0,1,0,0,0,0,0,2,0,1,0
";

    fn state(games: &std::path::Path) -> web::Data<AppState> {
        web::Data::new(AppState::new(RosterConfig::freebasers(), games.to_path_buf()))
    }

    fn games_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GAMES.as_bytes()).unwrap();
        file
    }

    #[actix_web::test]
    async fn lineup_round_trip_and_last() {
        let games = games_file();
        let app = test::init_service(App::new().app_data(state(games.path())).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/lineup/last").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/lineup")
            .set_json(serde_json::json!({"unavailable": ["Dave", "KBoe"]}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["team"], "Freebasers");
        assert_eq!(body["lineup"]["assignment"]["slots"].as_array().unwrap().len(), 10);

        let req = test::TestRequest::get().uri("/api/lineup/last").to_request();
        let last: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(last["lineup"], body["lineup"]);
    }

    #[actix_web::test]
    async fn full_house_finishes_under_the_default_budget() {
        let games = games_file();
        let app = test::init_service(App::new().app_data(state(games.path())).configure(configure)).await;

        let guests: Vec<_> = (1..=5)
            .map(|i| serde_json::json!({"name": format!("Guest{}", i), "athleticism": 5}))
            .collect();
        let req = test::TestRequest::post()
            .uri("/api/lineup")
            .set_json(serde_json::json!({"guests": guests}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["lineup"]["path"], "fallback");
        assert_eq!(body["lineup"]["nodes_visited"], DEFAULT_MAX_NODES);
        assert_eq!(body["lineup"]["bench"].as_array().unwrap().len(), 7);

        // a caller's own budget replaces the default
        let req = test::TestRequest::post()
            .uri("/api/lineup")
            .set_json(serde_json::json!({"unavailable": ["Dave", "KBoe"], "max_nodes": 10}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["lineup"]["path"], "fallback");
        assert_eq!(body["lineup"]["nodes_visited"], 10);
    }

    #[actix_web::test]
    async fn bad_guest_is_rejected() {
        let games = games_file();
        let app = test::init_service(App::new().app_data(state(games.path())).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/lineup")
            .set_json(serde_json::json!({"guests": [{"name": "Kevo", "preferences": "P"}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn stats_and_batting_order() {
        let games = games_file();
        let app = test::init_service(App::new().app_data(state(games.path())).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/stats/Fall2025").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["players"].as_array().unwrap().len(), 6);
        assert_eq!(stats["totals"]["Player"], "TOTAL");
        assert_eq!(stats["totals"]["AB"], 21);

        let req = test::TestRequest::get().uri("/api/batting-order/Fall2025").to_request();
        let order: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(order["order"].as_array().unwrap().len(), 6);

        let req = test::TestRequest::get().uri("/api/stats/Winter1990").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
