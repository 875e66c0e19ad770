use sea_orm::*;
use sea_orm::sea_query::Expr;
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::dto::PlaylistResponse;
use crate::models::forms::PlaylistForm;
use crate::models::{categorie, formation, formation_categorie, playlist};
use crate::services::formation_service::FormationService;
use crate::services::query_keys::{parse_categorie_id, PlaylistSearch, SortOrder};
use crate::services::DeleteOutcome;

pub struct PlaylistService;

impl PlaylistService {
    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<playlist::Model>, DbErr> {
        playlist::Entity::find_by_id(id).one(db).await
    }

    /// Toutes les playlists triées sur leur nom
    pub async fn find_all_order_by_name(
        db: &DatabaseConnection,
        order: SortOrder,
    ) -> Result<Vec<playlist::Model>, DbErr> {
        playlist::Entity::find()
            .order_by(playlist::Column::Name, order.into())
            .all(db)
            .await
    }

    /// Playlists triées selon leur nombre de formations.
    /// Jointure externe: une playlist sans formation compte pour 0 et reste présente.
    pub async fn find_all_order_by_nb_formations(
        db: &DatabaseConnection,
        order: SortOrder,
    ) -> Result<Vec<playlist::Model>, DbErr> {
        playlist::Entity::find()
            .join(JoinType::LeftJoin, playlist::Relation::Formation.def())
            .group_by(playlist::Column::Id)
            .order_by(
                Expr::col((formation::Entity, formation::Column::Id)).count(),
                order.into(),
            )
            // départage les playlists de même taille
            .order_by_asc(playlist::Column::Name)
            .all(db)
            .await
    }

    /// Playlists dont un champ contient la valeur, triées par nom.
    /// Une valeur vide renvoie toutes les playlists triées par nom.
    pub async fn find_by_contain_value(
        db: &DatabaseConnection,
        search: PlaylistSearch,
        value: &str,
    ) -> CatalogResult<Vec<playlist::Model>> {
        if value.is_empty() {
            return Ok(Self::find_all_order_by_name(db, SortOrder::Asc).await?);
        }

        let query = playlist::Entity::find()
            .join(JoinType::LeftJoin, playlist::Relation::Formation.def());

        let query = match search {
            PlaylistSearch::Name => query.filter(playlist::Column::Name.contains(value)),
            PlaylistSearch::CategorieName => {
                Self::join_categories(query).filter(categorie::Column::Name.contains(value))
            }
            PlaylistSearch::CategorieId => {
                let categorie_id = parse_categorie_id(value)?;
                Self::join_categories(query).filter(categorie::Column::Id.eq(categorie_id))
            }
        };

        let playlists = query
            .group_by(playlist::Column::Id)
            .order_by_asc(playlist::Column::Name)
            .all(db)
            .await?;

        Ok(playlists)
    }

    pub async fn count_formations(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
        formation::Entity::find()
            .filter(formation::Column::PlaylistId.eq(id))
            .count(db)
            .await
    }

    /// Crée (id absent) ou modifie une playlist
    pub async fn add(
        db: &DatabaseConnection,
        form: PlaylistForm,
        id: Option<i32>,
    ) -> CatalogResult<playlist::Model> {
        form.validate()?;

        let mut active: playlist::ActiveModel = match id {
            Some(id) => Self::find(db, id)
                .await?
                .ok_or(CatalogError::NotFound("Playlist"))?
                .into(),
            None => Default::default(),
        };

        active.name = Set(Some(form.name));
        active.description = Set(form.description.filter(|d| !d.is_empty()));

        let saved = match id {
            Some(_) => active.update(db).await?,
            None => active.insert(db).await?,
        };

        Ok(saved)
    }

    pub async fn remove(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
        playlist::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Supprime la playlist seulement si elle ne contient aucune formation
    pub async fn delete_if_empty(db: &DatabaseConnection, id: i32) -> CatalogResult<DeleteOutcome> {
        if Self::find(db, id).await?.is_none() {
            return Err(CatalogError::NotFound("Playlist"));
        }

        let nb_formations = Self::count_formations(db, id).await?;
        if nb_formations > 0 {
            tracing::info!(
                "Suppression de la playlist {} refusée: {} formation(s)",
                id,
                nb_formations
            );
            return Ok(DeleteOutcome::InUse(nb_formations));
        }

        Self::remove(db, id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Nombre de formations et noms distincts des catégories de chaque playlist
    pub async fn summaries(
        db: &DatabaseConnection,
        playlists: Vec<playlist::Model>,
    ) -> Result<Vec<PlaylistResponse>, DbErr> {
        if playlists.is_empty() {
            return Ok(Vec::new());
        }

        let playlist_ids: Vec<i32> = playlists.iter().map(|p| p.id).collect();

        // 1. Toutes les formations de ces playlists en une requête
        let formations = formation::Entity::find()
            .filter(formation::Column::PlaylistId.is_in(playlist_ids))
            .order_by_asc(formation::Column::Id)
            .all(db)
            .await?;

        // 2. Catégories de ces formations
        let categories_by_formation =
            FormationService::categories_by_formation(db, &formations).await?;

        let mut formations_by_playlist: HashMap<i32, Vec<formation::Model>> = HashMap::new();
        for f in formations {
            if let Some(playlist_id) = f.playlist_id {
                formations_by_playlist.entry(playlist_id).or_default().push(f);
            }
        }

        // 3. Construire la réponse
        let response = playlists
            .into_iter()
            .map(|p| {
                let formations = formations_by_playlist
                    .get(&p.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                PlaylistResponse {
                    id: p.id,
                    name: p.name,
                    description: p.description,
                    nb_formations: formations.len(),
                    categories: categories_playlist(formations, &categories_by_formation),
                }
            })
            .collect();

        Ok(response)
    }

    fn join_categories(query: Select<playlist::Entity>) -> Select<playlist::Entity> {
        query
            .join(JoinType::LeftJoin, formation::Relation::FormationCategorie.def())
            .join(JoinType::LeftJoin, formation_categorie::Relation::Categorie.def())
    }
}

/// Noms distincts des catégories utilisées par les formations, dans l'ordre de rencontre
fn categories_playlist(
    formations: &[formation::Model],
    categories_by_formation: &HashMap<i32, Vec<categorie::Model>>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    formations
        .iter()
        .filter_map(|f| categories_by_formation.get(&f.id))
        .flatten()
        .filter_map(|c| c.name.clone())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
