pub mod health;
pub mod accueil;
pub mod formations;
pub mod playlists;
pub mod login;
pub mod admin;

use actix_web::web;
use serde::Deserialize;

/// /tri/{field}/{order}[/{table}]
#[derive(Debug, Deserialize)]
pub struct SortPath {
    pub field: String,
    pub order: String,
    #[serde(default)]
    pub table: Option<String>,
}

/// /recherche/{field}[/{table}]
#[derive(Debug, Deserialize)]
pub struct SearchPath {
    pub field: String,
    #[serde(default)]
    pub table: Option<String>,
}

/// Terme de recherche, en query string (GET) ou en formulaire (POST)
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub recherche: Option<String>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(health::health_check))
        .configure(admin::admin_routes)
        .configure(formations::formations_routes)
        .configure(playlists::playlists_routes)
        .configure(login::login_routes)
        .configure(accueil::accueil_routes);
}
