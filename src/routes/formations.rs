use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::{CatalogError, CatalogResult};
use crate::models::dto::{FormationResponse, FormationsPage};
use crate::models::formation;
use crate::routes::{SearchParams, SearchPath, SortPath};
use crate::services::categorie_service::CategorieService;
use crate::services::formation_service::FormationService;
use crate::services::query_keys::{FormationSearch, FormationSort, SortOrder};

/// Page des formations: formations affichées + toutes les catégories (filtre)
pub(crate) async fn formations_page(
    db: &DatabaseConnection,
    formations: Vec<formation::Model>,
    valeur: Option<String>,
    table: Option<String>,
) -> CatalogResult<FormationsPage> {
    let formations = FormationService::with_relations(db, formations).await?;
    let categories = CategorieService::find_all(db).await?;

    Ok(FormationsPage {
        formations,
        categories,
        valeur,
        table,
    })
}

pub(crate) async fn sorted_page(
    db: &DatabaseConnection,
    path: SortPath,
) -> CatalogResult<FormationsPage> {
    let sort = FormationSort::parse(&path.field, path.table.as_deref())?;
    let order = SortOrder::parse(&path.order)?;

    let formations = FormationService::find_all_order_by(db, sort, order).await?;
    formations_page(db, formations, None, None).await
}

pub(crate) async fn search_page(
    db: &DatabaseConnection,
    path: SearchPath,
    params: SearchParams,
) -> CatalogResult<FormationsPage> {
    let search = FormationSearch::parse(&path.field, path.table.as_deref())?;
    let valeur = params.recherche.unwrap_or_default();

    let formations = FormationService::find_by_contain_value(db, search, &valeur).await?;
    formations_page(db, formations, Some(valeur), path.table).await
}

pub(crate) async fn formation_detail(
    db: &DatabaseConnection,
    id: i32,
) -> CatalogResult<FormationResponse> {
    let formation = FormationService::find(db, id)
        .await?
        .ok_or(CatalogError::NotFound("Formation"))?;

    FormationService::with_relations(db, vec![formation])
        .await?
        .pop()
        .ok_or(CatalogError::NotFound("Formation"))
}

/// GET /formations - Toutes les formations
#[get("")]
pub async fn index(db: web::Data<DatabaseConnection>) -> CatalogResult<HttpResponse> {
    let formations = FormationService::find_all(db.get_ref()).await?;
    let page = formations_page(db.get_ref(), formations, None, None).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /formations/tri/{field}/{order}[/{table}]
pub async fn sort(
    db: web::Data<DatabaseConnection>,
    path: web::Path<SortPath>,
) -> CatalogResult<HttpResponse> {
    let page = sorted_page(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /formations/recherche/{field}[/{table}]?recherche=...
pub async fn search_get(
    db: web::Data<DatabaseConnection>,
    path: web::Path<SearchPath>,
    params: web::Query<SearchParams>,
) -> CatalogResult<HttpResponse> {
    let page = search_page(db.get_ref(), path.into_inner(), params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /formations/recherche/{field}[/{table}] (formulaire recherche=...)
pub async fn search_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<SearchPath>,
    params: Option<web::Form<SearchParams>>,
) -> CatalogResult<HttpResponse> {
    // formulaire absent: recherche vide
    let params = params.map(web::Form::into_inner).unwrap_or_default();
    let page = search_page(db.get_ref(), path.into_inner(), params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /formations/formation/{id}
#[get("/formation/{id}")]
pub async fn show_one(
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let formation = formation_detail(db.get_ref(), id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "formation": formation })))
}

pub fn formations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/formations")
            .service(index)
            .route("/tri/{field}/{order}", web::get().to(sort))
            .route("/tri/{field}/{order}/{table}", web::get().to(sort))
            .route("/recherche/{field}", web::get().to(search_get))
            .route("/recherche/{field}", web::post().to(search_post))
            .route("/recherche/{field}/{table}", web::get().to(search_get))
            .route("/recherche/{field}/{table}", web::post().to(search_post))
            .service(show_one)
    );
}
