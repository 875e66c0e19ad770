use sea_orm::*;
use sea_orm::sea_query::{Expr, Func};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::forms::CategorieForm;
use crate::models::{categorie, formation, formation_categorie};
use crate::services::{CreateOutcome, DeleteOutcome};

pub struct CategorieService;

impl CategorieService {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<categorie::Model>, DbErr> {
        categorie::Entity::find().all(db).await
    }

    /// Toutes les catégories triées par nom
    pub async fn find_all_sorted(db: &DatabaseConnection) -> Result<Vec<categorie::Model>, DbErr> {
        categorie::Entity::find()
            .order_by_asc(categorie::Column::Name)
            .all(db)
            .await
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<categorie::Model>, DbErr> {
        categorie::Entity::find_by_id(id).one(db).await
    }

    /// Catégories des formations d'une playlist, sans doublon, triées par nom
    pub async fn find_all_for_one_playlist(
        db: &DatabaseConnection,
        playlist_id: i32,
    ) -> Result<Vec<categorie::Model>, DbErr> {
        categorie::Entity::find()
            .join(JoinType::InnerJoin, categorie::Relation::FormationCategorie.def())
            .join(JoinType::InnerJoin, formation_categorie::Relation::Formation.def())
            .filter(formation::Column::PlaylistId.eq(playlist_id))
            .distinct()
            .order_by_asc(categorie::Column::Name)
            .all(db)
            .await
    }

    /// Catégorie portant ce nom, casse ignorée (Test = test)
    pub async fn find_one_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Option<categorie::Model>, DbErr> {
        categorie::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    categorie::Entity,
                    categorie::Column::Name,
                ))))
                .eq(Func::lower(Expr::val(name))),
            )
            .one(db)
            .await
    }

    pub async fn add(db: &DatabaseConnection, name: String) -> Result<categorie::Model, DbErr> {
        categorie::ActiveModel {
            name: Set(Some(name)),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn remove(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
        categorie::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    pub async fn count_formations(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
        formation_categorie::Entity::find()
            .filter(formation_categorie::Column::CategorieId.eq(id))
            .count(db)
            .await
    }

    /// Ajoute la catégorie sauf si une catégorie de même nom (casse ignorée) existe.
    /// Vérification applicative: deux requêtes simultanées peuvent toutes deux passer.
    pub async fn create_unique(
        db: &DatabaseConnection,
        form: CategorieForm,
    ) -> CatalogResult<CreateOutcome<categorie::Model>> {
        form.validate()?;

        if let Some(existing) = Self::find_one_by_name(db, &form.name).await? {
            tracing::info!("Catégorie '{}' déjà existante (id {})", form.name, existing.id);
            return Ok(CreateOutcome::AlreadyExists(existing));
        }

        let created = Self::add(db, form.name).await?;
        Ok(CreateOutcome::Created(created))
    }

    /// Supprime la catégorie seulement si aucune formation ne l'utilise
    pub async fn delete_if_unused(db: &DatabaseConnection, id: i32) -> CatalogResult<DeleteOutcome> {
        if Self::find(db, id).await?.is_none() {
            return Err(CatalogError::NotFound("Catégorie"));
        }

        let nb_formations = Self::count_formations(db, id).await?;
        if nb_formations > 0 {
            tracing::info!(
                "Suppression de la catégorie {} refusée: {} formation(s)",
                id,
                nb_formations
            );
            return Ok(DeleteOutcome::InUse(nb_formations));
        }

        Self::remove(db, id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn names(categories: &[categorie::Model]) -> Vec<String> {
        categories.iter().filter_map(|c| c.name.clone()).collect()
    }

    fn form(name: &str) -> CategorieForm {
        CategorieForm { name: name.to_string() }
    }

    #[actix_web::test]
    async fn test_find_all_sorted() {
        let db = setup_db().await;

        let categories = CategorieService::find_all_sorted(&db).await.unwrap();

        assert_eq!(
            names(&categories),
            vec!["Android", "C#", "Java", "POO", "SQL", "UML"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[actix_web::test]
    async fn test_find_all_for_one_playlist() {
        let db = setup_db().await;

        let bases = CategorieService::find_all_for_one_playlist(&db, PLAYLIST_BASES).await.unwrap();
        assert_eq!(names(&bases), vec!["C#".to_string(), "POO".to_string()]);

        let eclipse = CategorieService::find_all_for_one_playlist(&db, PLAYLIST_ECLIPSE)
            .await
            .unwrap();
        assert_eq!(
            names(&eclipse),
            vec!["Android".to_string(), "Java".to_string(), "UML".to_string()]
        );

        let vide = CategorieService::find_all_for_one_playlist(&db, PLAYLIST_VIDE).await.unwrap();
        assert!(vide.is_empty());
    }

    #[actix_web::test]
    async fn test_find_one_by_name_ignores_case() {
        let db = setup_db().await;

        let found = CategorieService::find_one_by_name(&db, "java").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(CATEGORIE_JAVA));

        let found = CategorieService::find_one_by_name(&db, "poo").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(CATEGORIE_POO));

        assert!(CategorieService::find_one_by_name(&db, "Symfony").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_create_unique() {
        let db = setup_db().await;

        let created = CategorieService::create_unique(&db, form("Symfony")).await.unwrap();
        let created = match created {
            CreateOutcome::Created(c) => c,
            other => panic!("catégorie non créée: {:?}", other),
        };
        assert_eq!(created.name.as_deref(), Some("Symfony"));

        let duplicate = CategorieService::create_unique(&db, form("SYMFONY")).await.unwrap();
        assert_eq!(duplicate, CreateOutcome::AlreadyExists(created));
        assert_eq!(CategorieService::find_all(&db).await.unwrap().len(), 7);

        let invalid = CategorieService::create_unique(&db, form("")).await;
        assert!(matches!(invalid, Err(CatalogError::Validation(_))));
    }

    #[actix_web::test]
    async fn test_delete_rules() {
        let db = setup_db().await;

        assert_eq!(CategorieService::count_formations(&db, CATEGORIE_CSHARP).await.unwrap(), 11);
        let refused = CategorieService::delete_if_unused(&db, CATEGORIE_CSHARP).await.unwrap();
        assert_eq!(refused, DeleteOutcome::InUse(11));
        assert!(CategorieService::find(&db, CATEGORIE_CSHARP).await.unwrap().is_some());

        let symfony = CategorieService::add(&db, "Symfony".to_string()).await.unwrap();
        let deleted = CategorieService::delete_if_unused(&db, symfony.id).await.unwrap();
        assert_eq!(deleted, DeleteOutcome::Deleted);
        assert!(CategorieService::find(&db, symfony.id).await.unwrap().is_none());

        let missing = CategorieService::delete_if_unused(&db, symfony.id).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }
}
