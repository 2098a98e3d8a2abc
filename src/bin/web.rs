//! Single binary web server: JSON API over the tournament library.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT. Set PAIRING_SEED for reproducible pairings.

use actix_web::{
    delete, get, http::StatusCode, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chess_tournament_web::config::Settings;
use chess_tournament_web::csv_io::{export_standings, import_competitors};
use chess_tournament_web::{
    add_competitor, advance_round, compute_standings, create_tournament, record_outcome,
    record_round_results, round_matches, Competitor, GameMatch, MatchId, MemoryStore, Outcome,
    Standing, Storage, Store, StoreError, Tournament, TournamentError, TournamentId,
    TournamentState,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Shared state: the store plus the RNG used to shuffle brackets.
struct AppState {
    storage: Storage<MemoryStore>,
    rng: Mutex<StdRng>,
}

impl AppState {
    fn new(settings: &Settings) -> Self {
        Self {
            storage: Storage::new(MemoryStore::default()),
            rng: Mutex::new(settings.pairing_rng()),
        }
    }
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    num_rounds: i64,
}

#[derive(Deserialize)]
struct AddCompetitorBody {
    name: String,
    rating: i64,
}

#[derive(Deserialize)]
struct ResultEntry {
    match_id: MatchId,
    /// Empty entries leave the match pending.
    result: Option<f64>,
}

#[derive(Deserialize)]
struct RoundResultsBody {
    results: Vec<ResultEntry>,
}

#[derive(Deserialize)]
struct MatchResultBody {
    result: f64,
}

#[derive(Serialize)]
struct RejectedResult {
    match_id: MatchId,
    error: String,
}

/// Tournament page data: record, competitors, standings and each played round.
#[derive(Serialize)]
struct TournamentView {
    tournament: Tournament,
    state: TournamentState,
    competitors: Vec<Competitor>,
    standings: Vec<Standing>,
    rounds: BTreeMap<u32, Vec<GameMatch>>,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct RoundPath {
    id: TournamentId,
    round: u32,
}

#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

fn status_for(e: &TournamentError) -> StatusCode {
    match e {
        TournamentError::Store(StoreError::TournamentNotFound(_) | StoreError::MatchNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        TournamentError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        TournamentError::AlreadyGenerated { .. }
        | TournamentError::RoundNotComplete { .. }
        | TournamentError::TournamentComplete => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(e: TournamentError) -> HttpResponse {
    HttpResponse::build(status_for(&e)).json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "chess-tournament-web",
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: State) -> HttpResponse {
    match state.storage.read(|s| s.tournaments()) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e.into()),
    }
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: State, body: Json<CreateTournamentBody>) -> HttpResponse {
    let Ok(num_rounds) = u32::try_from(body.num_rounds) else {
        return error_response(TournamentError::InvalidRoundCount);
    };
    match state
        .storage
        .transaction(|s| create_tournament(s, &body.name, num_rounds))
    {
        Ok(t) => HttpResponse::Created().json(t),
        Err(e) => error_response(e),
    }
}

/// Tournament with standings and the matches of every generated round.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let view = state.storage.read(|s| {
        let tournament = s.tournament(path.id)?;
        let mut rounds = BTreeMap::new();
        for r in 1..=tournament.current_round {
            rounds.insert(r, round_matches(s, path.id, r)?);
        }
        Ok::<_, TournamentError>(TournamentView {
            state: tournament.state(),
            competitors: s.competitors(path.id)?,
            standings: compute_standings(s, path.id)?,
            tournament,
            rounds,
        })
    });
    match view {
        Ok(v) => HttpResponse::Ok().json(v),
        Err(e) => error_response(e),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.storage.transaction(|s| s.delete_tournament(path.id)) {
        Ok(()) => {
            log::info!("Deleted tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e.into()),
    }
}

#[post("/api/tournaments/{id}/competitors")]
async fn api_add_competitor(
    state: State,
    path: Path<TournamentPath>,
    body: Json<AddCompetitorBody>,
) -> HttpResponse {
    match state
        .storage
        .transaction(|s| add_competitor(s, path.id, &body.name, body.rating))
    {
        Ok(c) => HttpResponse::Created().json(c),
        Err(e) => error_response(e),
    }
}

/// Body is raw CSV: `name,rating` with a header row.
#[post("/api/tournaments/{id}/competitors/import")]
async fn api_import_competitors(state: State, path: Path<TournamentPath>, body: String) -> HttpResponse {
    match state
        .storage
        .transaction(|s| import_competitors(s, path.id, body.as_bytes()))
    {
        Ok(added) => HttpResponse::Ok().json(serde_json::json!({ "added": added })),
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.storage.read(|s| compute_standings(s, path.id)) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_export_standings(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let standings = match state.storage.read(|s| compute_standings(s, path.id)) {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };
    match export_standings(&standings) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=standings_{}.csv", path.id),
            ))
            .body(body),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Pair the next round. Refused while the current round has pending results.
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let mut rng = match state.rng.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = state
        .storage
        .transaction(|s| advance_round(s, path.id, &mut *rng));
    match result {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) if e.is_benign() => {
            HttpResponse::Ok().json(serde_json::json!({ "generated": false, "message": e.to_string() }))
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}/rounds/{round}")]
async fn api_round_matches(state: State, path: Path<RoundPath>) -> HttpResponse {
    match state.storage.read(|s| round_matches(s, path.id, path.round)) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(e),
    }
}

/// Enter results for a round; invalid entries are reported, the rest are saved.
#[put("/api/tournaments/{id}/rounds/{round}/results")]
async fn api_round_results(
    state: State,
    path: Path<RoundPath>,
    body: Json<RoundResultsBody>,
) -> HttpResponse {
    let entries: Vec<(MatchId, Option<f64>)> =
        body.results.iter().map(|r| (r.match_id, r.result)).collect();
    match state
        .storage
        .transaction(|s| record_round_results(s, path.id, path.round, &entries))
    {
        Ok(report) => {
            let rejected: Vec<RejectedResult> = report
                .rejected
                .into_iter()
                .map(|(match_id, e)| RejectedResult {
                    match_id,
                    error: e.to_string(),
                })
                .collect();
            HttpResponse::Ok().json(serde_json::json!({
                "updated": report.updated,
                "rejected": rejected,
            }))
        }
        Err(e) => error_response(e),
    }
}

#[put("/api/matches/{match_id}/result")]
async fn api_match_result(
    state: State,
    path: Path<MatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    let outcome = match Outcome::try_from(body.result) {
        Ok(o) => o,
        Err(e) => return error_response(e),
    };
    match state
        .storage
        .transaction(|s| record_outcome(s, path.match_id, outcome))
    {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(favicon)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_export_standings)
        .service(api_standings)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_add_competitor)
        .service(api_import_competitors)
        .service(api_next_round)
        .service(api_round_matches)
        .service(api_round_results)
        .service(api_match_result);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if let Some(seed) = settings.pairing_seed {
        log::info!("Using fixed pairing seed {}", seed);
    }
    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    let state = Data::new(AppState::new(&settings));

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((settings.host.as_str(), settings.port))?
        .run()
        .await
}
