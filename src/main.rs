mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;
#[cfg(test)]
mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::middleware::RevokedTokens;
use crate::services::user_service::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    tracing::info!("Connexion à la base de données...");
    let db = db::establish_connection(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to connect to database: {}", e)))?;
    tracing::info!("Base de données connectée");

    if config.init_schema {
        db::create_schema(&db)
            .await
            .map_err(|e| std::io::Error::other(format!("Failed to create schema: {}", e)))?;
    }

    // Compte administrateur créé au premier démarrage
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        match UserService::seed_admin(&db, username, password).await {
            Ok(true) => tracing::info!("Compte administrateur '{}' créé", username),
            Ok(false) => tracing::debug!("Compte administrateur '{}' déjà présent", username),
            Err(e) => tracing::warn!("Impossible de créer le compte administrateur: {}", e),
        }
    }

    let bind_address = (config.server_host.clone(), config.server_port);
    tracing::info!("Serveur démarré sur http://{}:{}", bind_address.0, bind_address.1);

    let config = web::Data::new(config);
    let revoked = web::Data::new(RevokedTokens::default());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(config.clone())
            .app_data(revoked.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}
