use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::{CatalogError, CatalogResult};
use crate::models::dto::{PlaylistDetail, PlaylistsPage};
use crate::models::playlist;
use crate::routes::{SearchParams, SearchPath, SortPath};
use crate::services::categorie_service::CategorieService;
use crate::services::formation_service::FormationService;
use crate::services::playlist_service::PlaylistService;
use crate::services::query_keys::{PlaylistSearch, PlaylistSort, SortOrder};

/// Page des playlists: résumés + toutes les catégories (filtre)
pub(crate) async fn playlists_page(
    db: &DatabaseConnection,
    playlists: Vec<playlist::Model>,
    valeur: Option<String>,
    table: Option<String>,
) -> CatalogResult<PlaylistsPage> {
    let playlists = PlaylistService::summaries(db, playlists).await?;
    let categories = CategorieService::find_all(db).await?;

    Ok(PlaylistsPage {
        playlists,
        categories,
        valeur,
        table,
    })
}

pub(crate) async fn sorted_page(
    db: &DatabaseConnection,
    path: SortPath,
) -> CatalogResult<PlaylistsPage> {
    // champ inconnu: liste par nom croissant, l'ordre n'est pas lu
    let playlists = match PlaylistSort::parse(&path.field) {
        Some(PlaylistSort::NbFormations) => {
            let order = SortOrder::parse(&path.order)?;
            PlaylistService::find_all_order_by_nb_formations(db, order).await?
        }
        Some(PlaylistSort::Name) => {
            let order = SortOrder::parse(&path.order)?;
            PlaylistService::find_all_order_by_name(db, order).await?
        }
        None => PlaylistService::find_all_order_by_name(db, SortOrder::Asc).await?,
    };

    playlists_page(db, playlists, None, None).await
}

pub(crate) async fn search_page(
    db: &DatabaseConnection,
    path: SearchPath,
    params: SearchParams,
) -> CatalogResult<PlaylistsPage> {
    let search = PlaylistSearch::parse(&path.field, path.table.as_deref())?;
    let valeur = params.recherche.unwrap_or_default();

    let playlists = PlaylistService::find_by_contain_value(db, search, &valeur).await?;
    playlists_page(db, playlists, Some(valeur), path.table).await
}

/// Playlist, ses catégories et ses formations (date croissante)
pub(crate) async fn playlist_detail(
    db: &DatabaseConnection,
    id: i32,
) -> CatalogResult<PlaylistDetail> {
    let playlist = PlaylistService::find(db, id)
        .await?
        .ok_or(CatalogError::NotFound("Playlist"))?;

    let playlist = PlaylistService::summaries(db, vec![playlist])
        .await?
        .pop()
        .ok_or(CatalogError::NotFound("Playlist"))?;

    let playlistcategories = CategorieService::find_all_for_one_playlist(db, id).await?;
    let formations = FormationService::find_all_for_one_playlist(db, id).await?;
    let playlistformations = FormationService::with_relations(db, formations).await?;

    Ok(PlaylistDetail {
        playlist,
        playlistcategories,
        playlistformations,
    })
}

/// GET /playlists - Playlists triées par nom
#[get("")]
pub async fn index(db: web::Data<DatabaseConnection>) -> CatalogResult<HttpResponse> {
    let playlists = PlaylistService::find_all_order_by_name(db.get_ref(), SortOrder::Asc).await?;
    let page = playlists_page(db.get_ref(), playlists, None, None).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /playlists/tri/{field}/{order}
pub async fn sort(
    db: web::Data<DatabaseConnection>,
    path: web::Path<SortPath>,
) -> CatalogResult<HttpResponse> {
    let page = sorted_page(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn search_get(
    db: web::Data<DatabaseConnection>,
    path: web::Path<SearchPath>,
    params: web::Query<SearchParams>,
) -> CatalogResult<HttpResponse> {
    let page = search_page(db.get_ref(), path.into_inner(), params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

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

/// GET /playlists/playlist/{id}
#[get("/playlist/{id}")]
pub async fn show_one(
    db: web::Data<DatabaseConnection>,
    id: web::Path<i32>,
) -> CatalogResult<HttpResponse> {
    let detail = playlist_detail(db.get_ref(), id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

pub fn playlists_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/playlists")
            .service(index)
            .route("/tri/{field}/{order}", web::get().to(sort))
            .route("/recherche/{field}", web::get().to(search_get))
            .route("/recherche/{field}", web::post().to(search_post))
            .route("/recherche/{field}/{table}", web::get().to(search_get))
            .route("/recherche/{field}/{table}", web::post().to(search_post))
            .service(show_one)
    );
}
