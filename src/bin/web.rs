//! Single binary web server: JSON API under /api, static front-end from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_DIR,
//! STORE_PATH, STATIC_DIR (see `padel_tracker_web::config`).

use actix_files::Files;
use actix_web::{get, web::Data, App, HttpResponse, HttpServer};
use padel_tracker_web::api::{self, AppService};
use padel_tracker_web::config::Settings;
use padel_tracker_web::{FileCache, JsonFileStore, SessionState, Tracker};

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let cache = FileCache::open(settings.cache_dir()).map_err(std::io::Error::other)?;
    log::info!("Local cache at {}", cache.dir().display());
    let store = JsonFileStore::new(&settings.store_path);
    log::info!("Match store at {}", store.path().display());

    let tracker = Tracker::restore(cache);
    if tracker.state() == SessionState::InProgress {
        log::info!("Resuming the match in progress");
    }
    let state: Data<AppService> = Data::new(AppService::new(tracker, store));

    let bind = (settings.host.clone(), settings.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let static_dir = settings.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
            .service(favicon)
            .service(Files::new("/static", &static_dir).index_file("index.html"))
    })
    .bind(bind)?
    .run()
    .await
}
