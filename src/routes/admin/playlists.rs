use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::{CatalogError, CatalogResult};
use crate::middleware::AdminUser;
use crate::models::dto::Flash;
use crate::models::forms::PlaylistForm;
use crate::routes::playlists::{playlist_detail, playlists_page, search_page, sorted_page};
use crate::routes::{SearchParams, SearchPath, SortPath};
use crate::services::formation_service::FormationService;
use crate::services::playlist_service::PlaylistService;
use crate::services::query_keys::SortOrder;
use crate::services::DeleteOutcome;

/// GET /admin/playlists
#[get("/playlists")]
pub async fn index(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> CatalogResult<HttpResponse> {
    let playlists = PlaylistService::find_all_order_by_name(db.get_ref(), SortOrder::Asc).await?;
    let page = playlists_page(db.get_ref(), playlists, None, None).await?;

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

/// GET /admin/playlists/playlist/{id}
#[get("/playlists/playlist/{id}")]
pub async fn show_one(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let detail = playlist_detail(db.get_ref(), id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /admin/playlist/ajout
#[post("/playlist/ajout")]
pub async fn ajout(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<PlaylistForm>,
) -> CatalogResult<HttpResponse> {
    let playlist = PlaylistService::add(db.get_ref(), body.into_inner(), None).await?;

    tracing::info!("Playlist {} ajoutée", playlist.id);
    Ok(HttpResponse::Created().json(serde_json::json!({ "playlist": playlist })))
}

/// GET /admin/playlist/edit/{id} - Playlist et ses formations
#[get("/playlist/edit/{id}")]
pub async fn edit_form(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let id = id.into_inner();
    let playlist = PlaylistService::find(db.get_ref(), id)
        .await?
        .ok_or(CatalogError::NotFound("Playlist"))?;

    let formations = FormationService::find_all_for_one_playlist(db.get_ref(), id).await?;
    let formations = FormationService::with_relations(db.get_ref(), formations).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "playlist": playlist,
        "formations": formations
    })))
}

/// POST /admin/playlist/edit/{id}
#[post("/playlist/edit/{id}")]
pub async fn edit(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
    body: web::Json<PlaylistForm>,
) -> CatalogResult<HttpResponse> {
    let playlist =
        PlaylistService::add(db.get_ref(), body.into_inner(), Some(id.into_inner())).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "playlist": playlist })))
}

/// POST /admin/playlist/edit/{id}/retrait/{formation_id} - Retire une formation de la playlist
#[post("/playlist/edit/{id}/retrait/{formation_id}")]
pub async fn retrait(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> CatalogResult<HttpResponse> {
    let (id, formation_id) = path.into_inner();

    let flash = if FormationService::detach_from_playlist(db.get_ref(), formation_id, id).await? {
        Flash::success("La formation a été retirée de la playlist.")
    } else {
        Flash::danger("Cette formation n'appartient pas à la playlist.")
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "flash": flash })))
}

/// POST /admin/playlist/delete/{id} - Refusée si la playlist contient des formations
#[post("/playlist/delete/{id}")]
pub async fn delete(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let flash = match PlaylistService::delete_if_empty(db.get_ref(), id.into_inner()).await? {
        DeleteOutcome::Deleted => Flash::success("La playlist a bien été supprimée."),
        DeleteOutcome::InUse(_) => {
            Flash::danger("Impossible de supprimer une playlist contenant des formations.")
        }
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "flash": flash })))
}

pub fn playlists_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .route("/playlists/tri/{field}/{order}", web::get().to(sort))
        .route("/playlists/recherche/{field}", web::get().to(search_get))
        .route("/playlists/recherche/{field}", web::post().to(search_post))
        .route("/playlists/recherche/{field}/{table}", web::get().to(search_get))
        .route("/playlists/recherche/{field}/{table}", web::post().to(search_post))
        .service(show_one)
        .service(ajout)
        .service(edit_form)
        .service(edit)
        .service(retrait)
        .service(delete);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::test_support::*;

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_index_and_sort() {
        let db = setup_db().await;
        let admin = admin_token(&db).await;
        let app = test_app!(db);

        let req = test::TestRequest::get().uri("/admin/playlists").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/admin/playlists/tri/nbFormations/desc")
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["playlists"][0]["name"], "Bases de la programmation (C#)");
        assert_eq!(body["playlists"][4]["nb_formations"], 0);
    }

    #[actix_web::test]
    async fn test_delete_rules() {
        let db = setup_db().await;
        let admin = admin_token(&db).await;
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri(&format!("/admin/playlist/delete/{}", PLAYLIST_BASES))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["flash"]["level"], "danger");
        assert_eq!(
            body["flash"]["message"],
            "Impossible de supprimer une playlist contenant des formations."
        );

        let req = test::TestRequest::post()
            .uri(&format!("/admin/playlist/delete/{}", PLAYLIST_VIDE))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["flash"]["level"], "success");

        let req = test::TestRequest::get()
            .uri(&format!("/admin/playlists/playlist/{}", PLAYLIST_VIDE))
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_ajout_and_edit() {
        let db = setup_db().await;
        let admin = admin_token(&db).await;
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri("/admin/playlist/ajout")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Symfony", "description": "Framework PHP" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["playlist"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/admin/playlist/edit/{}", id))
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Symfony 6" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["playlist"]["name"], "Symfony 6");
        assert!(body["playlist"]["description"].is_null());

        let req = test::TestRequest::post()
            .uri("/admin/playlist/ajout")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_edit_form_and_retrait() {
        let db = setup_db().await;
        let admin = admin_token(&db).await;
        let app = test_app!(db);
        let eclipse = formation_id("Eclipse n°8 : Déploiement");

        let req = test::TestRequest::get()
            .uri(&format!("/admin/playlist/edit/{}", PLAYLIST_ECLIPSE))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["formations"].as_array().unwrap().len(), 3);

        // Une formation d'une autre playlist n'est pas retirée
        let req = test::TestRequest::post()
            .uri(&format!("/admin/playlist/edit/{}/retrait/{}", PLAYLIST_BASES, eclipse))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["flash"]["level"], "danger");

        let req = test::TestRequest::post()
            .uri(&format!("/admin/playlist/edit/{}/retrait/{}", PLAYLIST_ECLIPSE, eclipse))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["flash"]["level"], "success");

        let req = test::TestRequest::get()
            .uri(&format!("/admin/playlist/edit/{}", PLAYLIST_ECLIPSE))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["formations"].as_array().unwrap().len(), 2);
    }
}
