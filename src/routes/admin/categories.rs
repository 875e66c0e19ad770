use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::CatalogResult;
use crate::middleware::AdminUser;
use crate::models::dto::{CategoriesPage, Flash};
use crate::models::forms::CategorieForm;
use crate::services::categorie_service::CategorieService;
use crate::services::{CreateOutcome, DeleteOutcome};

async fn categories_page(db: &DatabaseConnection, flash: Option<Flash>) -> CatalogResult<CategoriesPage> {
    let categories = CategorieService::find_all_sorted(db).await?;
    Ok(CategoriesPage { categories, flash })
}

/// GET /admin/categories - Catégories triées par nom
#[get("/categories")]
pub async fn index(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> CatalogResult<HttpResponse> {
    let page = categories_page(db.get_ref(), None).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /admin/categories - Ajout d'une catégorie au nom unique (casse ignorée)
#[post("/categories")]
pub async fn ajout(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CategorieForm>,
) -> CatalogResult<HttpResponse> {
    let flash = match CategorieService::create_unique(db.get_ref(), body.into_inner()).await? {
        CreateOutcome::Created(categorie) => {
            tracing::info!("Catégorie {} ajoutée", categorie.id);
            Flash::success("La catégorie a bien été ajoutée.")
        }
        CreateOutcome::AlreadyExists(_) => Flash::danger("Cette catégorie existe déjà."),
    };

    let page = categories_page(db.get_ref(), Some(flash)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /admin/categorie/delete/{id} - Refusée si une formation utilise la catégorie
#[post("/categorie/delete/{id}")]
pub async fn delete(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let flash = match CategorieService::delete_if_unused(db.get_ref(), id.into_inner()).await? {
        DeleteOutcome::Deleted => Flash::success("La catégorie a bien été supprimée."),
        DeleteOutcome::InUse(_) => {
            Flash::danger("Impossible de supprimer une catégorie associée à des formations.")
        }
    };

    let page = categories_page(db.get_ref(), Some(flash)).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub fn categories_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(ajout).service(delete);
}
