use std::io;

use actix_web::{App, HttpServer, middleware, web};
use config::{Config, Environment, File};
use diesel_migrations::MigrationHarness;
use env_logger::Env;

use pushkind_vineflow::MIGRATIONS;
use pushkind_vineflow::db::establish_connection_pool;
use pushkind_vineflow::feed::BatchFeed;
use pushkind_vineflow::models::config::ServerConfig;
use pushkind_vineflow::repository::DieselRepository;
use pushkind_vineflow::routes;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server_config = load_config().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to open database '{}': {e}", server_config.database_url);
        io::Error::other(e)
    })?;

    {
        let mut conn = pool.get().map_err(io::Error::other)?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("Failed to run migrations: {e}");
            io::Error::other(e.to_string())
        })?;
        log::info!("Applied {} pending migration(s)", applied.len());
    }

    let feed = BatchFeed::new(DieselRepository::new(pool));
    let _changes = feed
        .subscribe(|batches| log::debug!("Batch listing changed: {} batch(es)", batches.len()))
        .map_err(|e| {
            log::error!("Failed to load batches: {e}");
            io::Error::other(e)
        })?;
    let repo = web::Data::new(feed);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting VineFlow on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .service(web::scope("/api").configure(routes::configure))
    })
    .bind(bind_address)?
    .run()
    .await
}
