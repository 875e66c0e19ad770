// ============================================================================
// MODÈLE : FORMATION
// ============================================================================
//
// Description:
//   Une formation = une vidéo de cours référencée dans le catalogue.
//
// Colonnes de la table formation:
//   - id (INTEGER, PRIMARY KEY)
//   - published_at (DATETIME, NULL) - ne doit pas être dans le futur
//   - title (VARCHAR(100), NULL)
//   - description (TEXT, NULL)
//   - video_id (VARCHAR(20), NULL) - identifiant YouTube
//   - playlist_id (INTEGER, NULL, FK vers playlist)
//
// Points d'attention:
//   - La playlist est la SEULE relation possédée: les formations d'une
//     playlist se retrouvent par requête sur playlist_id
//   - Les catégories passent par la table formation_categorie
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Début de chemin vers les images des vidéos
pub const CHEMIN_IMAGE: &str = "https://i.ytimg.com/vi/";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub published_at: Option<DateTime>,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub playlist_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::playlist::Entity",
        from = "Column::PlaylistId",
        to = "super::playlist::Column::Id",
        on_delete = "SetNull"
    )]
    Playlist,

    #[sea_orm(has_many = "super::formation_categorie::Entity")]
    FormationCategorie,
}

impl Related<super::playlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Playlist.def()
    }
}

impl Related<super::formation_categorie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormationCategorie.def()
    }
}

impl Related<super::categorie::Entity> for Entity {
    fn to() -> RelationDef {
        super::formation_categorie::Relation::Categorie.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::formation_categorie::Relation::Formation.def().rev())
    }
}

impl Model {
    /// URL de la miniature de la vidéo
    pub fn miniature(&self) -> String {
        format!("{}{}/default.jpg", CHEMIN_IMAGE, self.video_id.as_deref().unwrap_or_default())
    }

    /// URL de l'image de la vidéo en haute qualité
    pub fn picture(&self) -> String {
        format!("{}{}/hqdefault.jpg", CHEMIN_IMAGE, self.video_id.as_deref().unwrap_or_default())
    }

    /// Date de publication au format jj/mm/aaaa, chaîne vide si absente
    pub fn published_at_string(&self) -> String {
        self.published_at
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
