// ============================================================================
// CLÉS DE TRI ET DE RECHERCHE
// ============================================================================
//
// Description:
//   Les routes reçoivent un champ, un ordre et éventuellement une table liée
//   sous forme de chaînes. Ce module les convertit en clés typées: seules les
//   combinaisons listées ici atteignent le constructeur de requêtes.
//
// Combinaisons acceptées:
//   Formation (tri)       : title | publishedAt | name+playlist | name+categories
//   Formation (recherche) : title | description | name+playlist
//                           | name+categories | id+categories
//   Playlist (tri)        : name | nbFormations
//   Playlist (recherche)  : name | name+categories | id+categories
//
// ============================================================================

use sea_orm::Order;

use crate::error::{CatalogError, CatalogResult};

/// Une table liée vide équivaut à aucune table
fn normalize_table(table: Option<&str>) -> Option<&str> {
    table.map(str::trim).filter(|t| !t.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// "asc" ou "desc", insensible à la casse
    pub fn parse(token: &str) -> CatalogResult<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CatalogError::InvalidOrder(token.to_string())),
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationSort {
    Title,
    PublishedAt,
    PlaylistName,
    CategorieName,
}

impl FormationSort {
    pub fn parse(field: &str, table: Option<&str>) -> CatalogResult<Self> {
        match (field, normalize_table(table)) {
            ("title", None) => Ok(FormationSort::Title),
            ("publishedAt" | "published_at", None) => Ok(FormationSort::PublishedAt),
            ("name", Some("playlist")) => Ok(FormationSort::PlaylistName),
            ("name", Some("categories")) => Ok(FormationSort::CategorieName),
            (field, table) => Err(CatalogError::InvalidSortKey {
                field: field.to_string(),
                table: table.map(str::to_string),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationSearch {
    Title,
    Description,
    PlaylistName,
    CategorieName,
    CategorieId,
}

impl FormationSearch {
    pub fn parse(field: &str, table: Option<&str>) -> CatalogResult<Self> {
        match (field, normalize_table(table)) {
            ("title", None) => Ok(FormationSearch::Title),
            ("description", None) => Ok(FormationSearch::Description),
            ("name", Some("playlist")) => Ok(FormationSearch::PlaylistName),
            ("name", Some("categories")) => Ok(FormationSearch::CategorieName),
            ("id", Some("categories")) => Ok(FormationSearch::CategorieId),
            (field, table) => Err(CatalogError::InvalidSearchKey {
                field: field.to_string(),
                table: table.map(str::to_string),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistSort {
    Name,
    NbFormations,
}

impl PlaylistSort {
    /// None pour un champ inconnu: la route retombe alors sur le tri par nom
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(PlaylistSort::Name),
            "nbFormations" | "nb_formations" => Some(PlaylistSort::NbFormations),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistSearch {
    Name,
    CategorieName,
    CategorieId,
}

impl PlaylistSearch {
    pub fn parse(field: &str, table: Option<&str>) -> CatalogResult<Self> {
        match (field, normalize_table(table)) {
            ("name", None) => Ok(PlaylistSearch::Name),
            ("name", Some("categories")) => Ok(PlaylistSearch::CategorieName),
            ("id", Some("categories")) => Ok(PlaylistSearch::CategorieId),
            (field, table) => Err(CatalogError::InvalidSearchKey {
                field: field.to_string(),
                table: table.map(str::to_string),
            }),
        }
    }
}

/// Identifiant de catégorie saisi dans le filtre (comparaison exacte)
pub fn parse_categorie_id(value: &str) -> CatalogResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| CatalogError::InvalidSearchValue(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_is_case_insensitive() {
        assert_eq!(SortOrder::parse("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse("DESC").unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse("Desc").unwrap(), SortOrder::Desc);
        assert!(matches!(SortOrder::parse("up"), Err(CatalogError::InvalidOrder(_))));
    }

    #[test]
    fn test_formation_sort_keys() {
        assert_eq!(FormationSort::parse("title", None).unwrap(), FormationSort::Title);
        assert_eq!(FormationSort::parse("title", Some("")).unwrap(), FormationSort::Title);
        assert_eq!(
            FormationSort::parse("publishedAt", None).unwrap(),
            FormationSort::PublishedAt
        );
        assert_eq!(
            FormationSort::parse("name", Some("playlist")).unwrap(),
            FormationSort::PlaylistName
        );
        assert_eq!(
            FormationSort::parse("name", Some("categories")).unwrap(),
            FormationSort::CategorieName
        );
    }

    #[test]
    fn test_formation_sort_rejects_unknown_keys() {
        assert!(matches!(
            FormationSort::parse("password", None),
            Err(CatalogError::InvalidSortKey { .. })
        ));
        // Un champ valide sur la mauvaise table est refusé aussi
        assert!(FormationSort::parse("title", Some("playlist")).is_err());
        assert!(FormationSort::parse("name", Some("user")).is_err());
        assert!(FormationSort::parse("title; DROP TABLE formation", None).is_err());
    }

    #[test]
    fn test_formation_search_keys() {
        assert_eq!(FormationSearch::parse("title", None).unwrap(), FormationSearch::Title);
        assert_eq!(
            FormationSearch::parse("id", Some("categories")).unwrap(),
            FormationSearch::CategorieId
        );
        assert!(matches!(
            FormationSearch::parse("id", None),
            Err(CatalogError::InvalidSearchKey { .. })
        ));
    }

    #[test]
    fn test_playlist_keys() {
        assert_eq!(PlaylistSort::parse("name"), Some(PlaylistSort::Name));
        assert_eq!(PlaylistSort::parse("nbFormations"), Some(PlaylistSort::NbFormations));
        assert_eq!(PlaylistSort::parse("description"), None);

        assert_eq!(PlaylistSearch::parse("name", None).unwrap(), PlaylistSearch::Name);
        assert_eq!(
            PlaylistSearch::parse("name", Some("categories")).unwrap(),
            PlaylistSearch::CategorieName
        );
        assert!(PlaylistSearch::parse("name", Some("playlist")).is_err());
    }

    #[test]
    fn test_parse_categorie_id() {
        assert_eq!(parse_categorie_id("3").unwrap(), 3);
        assert_eq!(parse_categorie_id(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_categorie_id("C#"),
            Err(CatalogError::InvalidSearchValue(_))
        ));
    }
}
