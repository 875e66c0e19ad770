use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::CatalogResult;
use crate::middleware::AdminUser;
use crate::models::dto::{CguPage, Flash, NamedRef};
use crate::models::forms::FormationForm;
use crate::routes::formations::{formation_detail, formations_page, search_page, sorted_page};
use crate::routes::{SearchParams, SearchPath, SortPath};
use crate::services::categorie_service::CategorieService;
use crate::services::formation_service::FormationService;
use crate::services::playlist_service::PlaylistService;
use crate::services::query_keys::SortOrder;

/// GET /admin - Gestion des formations
#[get("")]
pub async fn index(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> CatalogResult<HttpResponse> {
    let formations = FormationService::find_all(db.get_ref()).await?;
    let page = formations_page(db.get_ref(), formations, None, None).await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn sort(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<SortPath>,
) -> CatalogResult<HttpResponse> {
    let page = sorted_page(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn search_get(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<SearchPath>,
    params: web::Query<SearchParams>,
) -> CatalogResult<HttpResponse> {
    let page = search_page(db.get_ref(), path.into_inner(), params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn search_post(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<SearchPath>,
    params: Option<web::Form<SearchParams>>,
) -> CatalogResult<HttpResponse> {
    // formulaire absent: recherche vide
    let params = params.map(web::Form::into_inner).unwrap_or_default();
    let page = search_page(db.get_ref(), path.into_inner(), params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /admin/formations/formation/{id}
#[get("/formations/formation/{id}")]
pub async fn show_one(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let formation = formation_detail(db.get_ref(), id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "formation": formation })))
}

/// POST /admin/formation/ajout - Nouvelle formation
#[post("/formation/ajout")]
pub async fn ajout(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<FormationForm>,
) -> CatalogResult<HttpResponse> {
    let formation = FormationService::add(db.get_ref(), body.into_inner(), None).await?;
    let formation = formation_detail(db.get_ref(), formation.id).await?;

    tracing::info!("Formation {} ajoutée", formation.id);
    Ok(HttpResponse::Created().json(serde_json::json!({ "formation": formation })))
}

/// GET /admin/formation/edit/{id} - Formation et choix possibles du formulaire
#[get("/formation/edit/{id}")]
pub async fn edit_form(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let formation = formation_detail(db.get_ref(), id.into_inner()).await?;

    let playlists: Vec<NamedRef> =
        PlaylistService::find_all_order_by_name(db.get_ref(), SortOrder::Asc)
            .await?
            .iter()
            .map(NamedRef::from)
            .collect();
    let categories: Vec<NamedRef> = CategorieService::find_all_sorted(db.get_ref())
        .await?
        .iter()
        .map(NamedRef::from)
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "formation": formation,
        "playlists": playlists,
        "categories": categories
    })))
}

/// POST /admin/formation/edit/{id} - Modification en place
#[post("/formation/edit/{id}")]
pub async fn edit(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
    body: web::Json<FormationForm>,
) -> CatalogResult<HttpResponse> {
    let id = id.into_inner();
    FormationService::add(db.get_ref(), body.into_inner(), Some(id)).await?;
    let formation = formation_detail(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "formation": formation })))
}

/// POST /admin/formation/delete/{id}
#[post("/formation/delete/{id}")]
pub async fn delete(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    FormationService::remove(db.get_ref(), id.into_inner()).await?;
    let remaining = FormationService::count(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "flash": Flash::success("La formation a bien été supprimée"),
        "nb_formations": remaining
    })))
}

#[get("/cgu")]
pub async fn cgu(_admin: AdminUser) -> HttpResponse {
    HttpResponse::Ok().json(CguPage { page: "admin.cgu" })
}

pub fn formations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .route("/formations/tri/{field}/{order}", web::get().to(sort))
        .route("/formations/tri/{field}/{order}/{table}", web::get().to(sort))
        .route("/formations/recherche/{field}", web::get().to(search_get))
        .route("/formations/recherche/{field}", web::post().to(search_post))
        .route("/formations/recherche/{field}/{table}", web::get().to(search_get))
        .route("/formations/recherche/{field}/{table}", web::post().to(search_post))
        .service(show_one)
        .service(ajout)
        .service(edit_form)
        .service(edit)
        .service(delete)
        .service(cgu);
}
