// Formulaires de l'espace d'administration
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FormationForm {
    #[validate(custom(function = "obligatoire", message = "Le titre est obligatoire"))]
    #[validate(length(max = 100, message = "Le titre est trop long"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    // Date seule (champ date du formulaire), stockée à minuit
    #[serde(default)]
    #[validate(required(message = "La date est obligatoire"))]
    #[validate(custom(function = "date_pas_dans_le_futur"))]
    pub published_at: Option<NaiveDate>,

    #[serde(default)]
    #[validate(length(max = 20, message = "L'identifiant de la vidéo est trop long"))]
    pub video_id: Option<String>,

    #[validate(required(message = "Le choix de la playlist est obligatoire"))]
    pub playlist_id: Option<i32>,

    #[serde(default)]
    pub categories: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaylistForm {
    #[validate(custom(function = "obligatoire", message = "Le titre est obligatoire"))]
    #[validate(length(max = 100, message = "Le titre est trop long"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategorieForm {
    #[validate(custom(function = "obligatoire", message = "Le nom de la catégorie est obligatoire"))]
    #[validate(length(max = 50, message = "Le nom de la catégorie est trop long"))]
    pub name: String,
}

// Champ texte non vide une fois les espaces retirés
fn obligatoire(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("obligatoire"));
    }
    Ok(())
}

/// Vérifie qu'une date de publication n'est pas postérieure à aujourd'hui
fn date_pas_dans_le_futur(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Local::now().date_naive() {
        let mut error = ValidationError::new("date_future");
        error.message = Some("La date ne peut pas être postérieure à la date du jour.".into());
        return Err(error);
    }
    Ok(())
}
