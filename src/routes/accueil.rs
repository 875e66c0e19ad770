use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::CatalogResult;
use crate::models::dto::CguPage;
use crate::services::formation_service::FormationService;

/// GET / - Les deux dernières formations publiées
#[get("/")]
pub async fn index(db: web::Data<DatabaseConnection>) -> CatalogResult<HttpResponse> {
    let formations = FormationService::find_all_lasted(db.get_ref(), 2).await?;
    let formations = FormationService::with_relations(db.get_ref(), formations).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "formations": formations
    })))
}

/// GET /cgu - Conditions générales d'utilisation
#[get("/cgu")]
pub async fn cgu() -> HttpResponse {
    HttpResponse::Ok().json(CguPage { page: "cgu" })
}

pub fn accueil_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(cgu);
}
