use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::models::dto::HealthResponse;
use crate::services::formation_service::FormationService;

/// GET /api/health - état du catalogue
/// 503 quand la base ne répond pas
#[get("/health")]
pub async fn health_check(db: web::Data<DatabaseConnection>) -> HttpResponse {
    let nb_formations = match db.ping().await {
        Ok(()) => FormationService::count(db.get_ref()).await.ok(),
        Err(e) => {
            tracing::warn!(error = %e, "base de données injoignable");
            None
        }
    };

    match nb_formations {
        Some(nb) => HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            database: "ok",
            nb_formations: Some(nb),
            time: Utc::now(),
        }),
        None => HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "degraded",
            database: "indisponible",
            nb_formations: None,
            time: Utc::now(),
        }),
    }
}
