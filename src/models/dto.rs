//pour les réponses structurées des pages
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::models::{categorie, formation, playlist};

/// État du service et de la base du catalogue
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub nb_formations: Option<u64>,
    pub time: DateTime<Utc>,
}

/// Référence courte vers une playlist ou une catégorie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NamedRef {
    pub id: i32,
    pub name: Option<String>,
}

impl From<&playlist::Model> for NamedRef {
    fn from(p: &playlist::Model) -> Self {
        NamedRef { id: p.id, name: p.name.clone() }
    }
}

impl From<&categorie::Model> for NamedRef {
    fn from(c: &categorie::Model) -> Self {
        NamedRef { id: c.id, name: c.name.clone() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormationResponse {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub published_at_string: String,
    pub video_id: Option<String>,
    pub miniature: String,
    pub picture: String,
    pub playlist: Option<NamedRef>,
    pub categories: Vec<NamedRef>,
}

impl FormationResponse {
    pub fn new(
        f: formation::Model,
        playlist: Option<&playlist::Model>,
        categories: &[categorie::Model],
    ) -> Self {
        FormationResponse {
            published_at_string: f.published_at_string(),
            miniature: f.miniature(),
            picture: f.picture(),
            id: f.id,
            title: f.title,
            description: f.description,
            published_at: f.published_at,
            video_id: f.video_id,
            playlist: playlist.map(NamedRef::from),
            categories: categories.iter().map(NamedRef::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResponse {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub nb_formations: usize,
    // Noms distincts des catégories des formations de la playlist
    pub categories: Vec<String>,
}

/// Page de liste des formations (publique ou admin)
#[derive(Serialize)]
pub struct FormationsPage {
    pub formations: Vec<FormationResponse>,
    pub categories: Vec<categorie::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valeur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// Page de liste des playlists (publique ou admin)
#[derive(Serialize)]
pub struct PlaylistsPage {
    pub playlists: Vec<PlaylistResponse>,
    pub categories: Vec<categorie::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valeur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// Détail d'une playlist avec ses catégories et ses formations
#[derive(Serialize)]
pub struct PlaylistDetail {
    pub playlist: PlaylistResponse,
    pub playlistcategories: Vec<categorie::Model>,
    pub playlistformations: Vec<FormationResponse>,
}

/// Page d'administration des catégories
#[derive(Serialize)]
pub struct CategoriesPage {
    pub categories: Vec<categorie::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Message affiché à l'utilisateur après une action d'administration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash { level: FlashLevel::Success, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Flash { level: FlashLevel::Danger, message: message.into() }
    }
}

#[derive(Serialize)]
pub struct CguPage {
    pub page: &'static str,
}
