use sea_orm::*;
use chrono::NaiveTime;
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::dto::FormationResponse;
use crate::models::forms::FormationForm;
use crate::models::{categorie, formation, formation_categorie, playlist};
use crate::services::query_keys::{parse_categorie_id, FormationSearch, FormationSort, SortOrder};

pub struct FormationService;

impl FormationService {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<formation::Model>, DbErr> {
        formation::Entity::find().all(db).await
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<formation::Model>, DbErr> {
        formation::Entity::find_by_id(id).one(db).await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        formation::Entity::find().count(db).await
    }

    /// Toutes les formations triées sur un champ, éventuellement d'une table liée
    pub async fn find_all_order_by(
        db: &DatabaseConnection,
        sort: FormationSort,
        order: SortOrder,
    ) -> Result<Vec<formation::Model>, DbErr> {
        let order: Order = order.into();
        let query = formation::Entity::find();

        let formations = match sort {
            FormationSort::Title => query.order_by(formation::Column::Title, order),
            FormationSort::PublishedAt => query.order_by(formation::Column::PublishedAt, order),
            FormationSort::PlaylistName => query
                .join(JoinType::InnerJoin, formation::Relation::Playlist.def())
                .order_by(playlist::Column::Name, order),
            FormationSort::CategorieName => {
                Self::join_categories(query).order_by(categorie::Column::Name, order)
            }
        }
        .all(db)
        .await?;

        Ok(dedup_by_id(formations))
    }

    /// Formations dont un champ contient la valeur, les plus récentes d'abord.
    /// Une valeur vide renvoie toutes les formations.
    pub async fn find_by_contain_value(
        db: &DatabaseConnection,
        search: FormationSearch,
        value: &str,
    ) -> CatalogResult<Vec<formation::Model>> {
        if value.is_empty() {
            return Ok(Self::find_all(db).await?);
        }

        let query = formation::Entity::find();
        let query = match search {
            FormationSearch::Title => query.filter(formation::Column::Title.contains(value)),
            FormationSearch::Description => {
                query.filter(formation::Column::Description.contains(value))
            }
            FormationSearch::PlaylistName => query
                .join(JoinType::InnerJoin, formation::Relation::Playlist.def())
                .filter(playlist::Column::Name.contains(value)),
            FormationSearch::CategorieName => {
                Self::join_categories(query).filter(categorie::Column::Name.contains(value))
            }
            FormationSearch::CategorieId => {
                let categorie_id = parse_categorie_id(value)?;
                Self::join_categories(query).filter(categorie::Column::Id.eq(categorie_id))
            }
        };

        let formations = query
            .order_by_desc(formation::Column::PublishedAt)
            .all(db)
            .await?;

        Ok(dedup_by_id(formations))
    }

    /// Les `nb` formations les plus récemment publiées
    pub async fn find_all_lasted(
        db: &DatabaseConnection,
        nb: u64,
    ) -> Result<Vec<formation::Model>, DbErr> {
        formation::Entity::find()
            .order_by_desc(formation::Column::PublishedAt)
            .limit(nb)
            .all(db)
            .await
    }

    /// Formations d'une playlist, par date de publication croissante
    pub async fn find_all_for_one_playlist(
        db: &DatabaseConnection,
        playlist_id: i32,
    ) -> Result<Vec<formation::Model>, DbErr> {
        formation::Entity::find()
            .filter(formation::Column::PlaylistId.eq(playlist_id))
            .order_by_asc(formation::Column::PublishedAt)
            .all(db)
            .await
    }

    /// Crée (id absent) ou modifie une formation à partir du formulaire.
    /// Les liens vers les catégories sont remplacés par ceux du formulaire.
    pub async fn add(
        db: &DatabaseConnection,
        form: FormationForm,
        id: Option<i32>,
    ) -> CatalogResult<formation::Model> {
        form.validate()?;

        // 1. Vérifier la playlist et les catégories référencées
        let playlist_id = form
            .playlist_id
            .ok_or_else(|| CatalogError::InvalidReference("playlist manquante".to_string()))?;

        if playlist::Entity::find_by_id(playlist_id).one(db).await?.is_none() {
            return Err(CatalogError::InvalidReference(format!("playlist {}", playlist_id)));
        }

        let categorie_ids: Vec<i32> = form
            .categories
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if !categorie_ids.is_empty() {
            let found = categorie::Entity::find()
                .filter(categorie::Column::Id.is_in(categorie_ids.clone()))
                .count(db)
                .await?;
            if found != categorie_ids.len() as u64 {
                return Err(CatalogError::InvalidReference("catégorie inconnue".to_string()));
            }
        }

        // 2. Enregistrer la formation et ses catégories dans une transaction
        let txn = db.begin().await?;

        let mut active: formation::ActiveModel = match id {
            Some(id) => formation::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(CatalogError::NotFound("Formation"))?
                .into(),
            None => Default::default(),
        };

        active.title = Set(Some(form.title));
        active.description = Set(form.description.filter(|d| !d.is_empty()));
        active.published_at = Set(form.published_at.map(|date| date.and_time(NaiveTime::MIN)));
        active.video_id = Set(form.video_id.filter(|v| !v.is_empty()));
        active.playlist_id = Set(Some(playlist_id));

        let saved = match id {
            Some(_) => active.update(&txn).await?,
            None => active.insert(&txn).await?,
        };

        formation_categorie::Entity::delete_many()
            .filter(formation_categorie::Column::FormationId.eq(saved.id))
            .exec(&txn)
            .await?;

        if !categorie_ids.is_empty() {
            let links = categorie_ids.iter().map(|categorie_id| formation_categorie::ActiveModel {
                formation_id: Set(saved.id),
                categorie_id: Set(*categorie_id),
            });
            formation_categorie::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::debug!("Formation {} enregistrée", saved.id);
        Ok(saved)
    }

    /// Supprime une formation et ses liens vers les catégories.
    /// La playlist et les catégories ne sont jamais supprimées.
    pub async fn remove(db: &DatabaseConnection, id: i32) -> CatalogResult<()> {
        if Self::find(db, id).await?.is_none() {
            return Err(CatalogError::NotFound("Formation"));
        }

        let txn = db.begin().await?;

        formation_categorie::Entity::delete_many()
            .filter(formation_categorie::Column::FormationId.eq(id))
            .exec(&txn)
            .await?;

        formation::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!("Formation {} supprimée", id);
        Ok(())
    }

    /// Retire une formation d'une playlist, seulement si cette playlist la possède.
    /// Renvoie true si la formation a été détachée.
    pub async fn detach_from_playlist(
        db: &DatabaseConnection,
        formation_id: i32,
        playlist_id: i32,
    ) -> CatalogResult<bool> {
        let formation = Self::find(db, formation_id)
            .await?
            .ok_or(CatalogError::NotFound("Formation"))?;

        if formation.playlist_id != Some(playlist_id) {
            return Ok(false);
        }

        let mut active: formation::ActiveModel = formation.into();
        active.playlist_id = Set(None);
        active.update(db).await?;

        Ok(true)
    }

    /// Charge les playlists et catégories des formations pour l'affichage.
    /// Trois requêtes au total, quel que soit le nombre de formations.
    pub async fn with_relations(
        db: &DatabaseConnection,
        formations: Vec<formation::Model>,
    ) -> Result<Vec<FormationResponse>, DbErr> {
        if formations.is_empty() {
            return Ok(Vec::new());
        }

        // 1. Playlists référencées
        let playlist_ids: Vec<i32> = formations
            .iter()
            .filter_map(|f| f.playlist_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let playlists: HashMap<i32, playlist::Model> = if playlist_ids.is_empty() {
            HashMap::new()
        } else {
            playlist::Entity::find()
                .filter(playlist::Column::Id.is_in(playlist_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        // 2. Catégories de chaque formation
        let categories_by_formation = Self::categories_by_formation(db, &formations).await?;

        // 3. Construire la réponse dans l'ordre reçu
        let response = formations
            .into_iter()
            .map(|f| {
                let playlist = f.playlist_id.and_then(|id| playlists.get(&id));
                let categories = categories_by_formation
                    .get(&f.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                FormationResponse::new(f, playlist, categories)
            })
            .collect();

        Ok(response)
    }

    /// Catégories de chaque formation, triées par nom
    pub async fn categories_by_formation(
        db: &DatabaseConnection,
        formations: &[formation::Model],
    ) -> Result<HashMap<i32, Vec<categorie::Model>>, DbErr> {
        let formation_ids: Vec<i32> = formations.iter().map(|f| f.id).collect();
        if formation_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = formation_categorie::Entity::find()
            .filter(formation_categorie::Column::FormationId.is_in(formation_ids))
            .all(db)
            .await?;

        let categorie_ids: Vec<i32> = links
            .iter()
            .map(|l| l.categorie_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if categorie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let categories: HashMap<i32, categorie::Model> = categorie::Entity::find()
            .filter(categorie::Column::Id.is_in(categorie_ids))
            .order_by_asc(categorie::Column::Name)
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut by_formation: HashMap<i32, Vec<categorie::Model>> = HashMap::new();
        for link in links {
            if let Some(c) = categories.get(&link.categorie_id) {
                by_formation.entry(link.formation_id).or_default().push(c.clone());
            }
        }
        for list in by_formation.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(by_formation)
    }

    fn join_categories(query: Select<formation::Entity>) -> Select<formation::Entity> {
        query
            .join(JoinType::InnerJoin, formation::Relation::FormationCategorie.def())
            .join(JoinType::InnerJoin, formation_categorie::Relation::Categorie.def())
    }
}

/// Une jointure sur les catégories peut dupliquer une formation:
/// seule sa première occurrence est conservée
fn dedup_by_id(formations: Vec<formation::Model>) -> Vec<formation::Model> {
    let mut seen = HashSet::new();
    formations.into_iter().filter(|f| seen.insert(f.id)).collect()
}
