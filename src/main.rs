mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;

use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use crate::config::Config;
use crate::db::employee_store::{EmployeeStore, PgEmployeeStore};

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(startup_error)?;

    let pool = db::create_pool(&config).await.map_err(startup_error)?;
    db::run_migrations(&pool).await.map_err(startup_error)?;

    let store: Arc<dyn EmployeeStore> = Arc::new(PgEmployeeStore::new(pool.clone()));
    let (host, port) = config.bind_address();

    info!("Starting server at {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(Arc::clone(&store)))
            .service(web::scope("/api").configure(handlers::employee::configure))
    })
    .bind((host, port))?
    .run()
    .await?;

    pool.close().await;
    info!("Database pool closed");
    Ok(())
}
