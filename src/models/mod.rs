// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque entité correspond à une table avec SeaORM.
//
// Liste des modules:
//   - formation : Vidéos de formation (titre, date, vidéo YouTube)
//   - playlist : Regroupements de formations
//   - categorie : Catégories appliquées aux formations
//   - formation_categorie : Table de jointure formation <-> categorie
//   - user : Comptes de l'espace d'administration
//   - forms : Formulaires d'administration validés (validator)
//   - dto : Réponses JSON des pages
//
// Points d'attention:
//   - Une formation appartient à au plus une playlist (playlist_id)
//   - Les formations d'une playlist sont toujours obtenues par requête
//
// ============================================================================

pub mod formation;
pub mod playlist;
pub mod categorie;
pub mod formation_categorie;
pub mod user;
pub mod forms;
pub mod dto;
