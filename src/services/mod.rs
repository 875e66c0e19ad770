pub mod query_keys;
pub mod formation_service;
pub mod playlist_service;
pub mod categorie_service;
pub mod user_service;

/// Résultat d'une suppression soumise à la règle "aucune formation liée"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    // Suppression refusée: nombre de formations encore rattachées
    InUse(u64),
}

/// Résultat de la création d'une catégorie (nom unique, casse ignorée)
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome<M> {
    Created(M),
    AlreadyExists(M),
}
