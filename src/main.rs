use std::io;
use std::sync::Arc;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::{self as aweb, Data};
use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use maagap::config::AppConfig;
use maagap::db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use maagap::services;
use maagap::storage::LocalObjectStore;
use maagap::web::{self, handlers::public, middleware::SecurityHeaders, AppState};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    init_tracing(config.log_json);

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PgDocumentStore::connect(url).await.map_err(io::Error::other)?),
        None => {
            tracing::warn!("DATABASE_URL is not set; using an in-memory store, data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let objects = Arc::new(LocalObjectStore::new(
        config.upload_dir.clone(),
        &config.public_upload_base,
    ));

    if let Some(admin) = &config.admin {
        match services::bootstrap_admin(store.as_ref(), &admin.email, &admin.password).await {
            Ok(true) => tracing::info!(email = %admin.email, "created bootstrap admin account"),
            Ok(false) => tracing::debug!(email = %admin.email, "bootstrap admin already exists"),
            Err(e) => return Err(io::Error::other(e)),
        }
    } else {
        tracing::info!("no bootstrap admin configured");
    }

    let state = Data::new(AppState::new(store, objects, config.web.clone()));
    let options = config.web.clone();
    let secure = config.web.secure_cookies;
    let upload_dir = config.upload_dir.clone();

    tracing::info!(bind_addr = %config.bind_addr, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders::new(secure))
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(Files::new("/uploads", upload_dir.clone()))
            .configure(web::configure(options.clone()))
            .default_service(aweb::to(public::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
