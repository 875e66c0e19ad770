use sea_orm::*;
use serde_json::json;

use crate::error::{CatalogError, CatalogResult};
use crate::models::user::{self, ROLE_ADMIN};
use crate::utils::password;

pub struct UserService;

impl UserService {
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Remplace le hash du mot de passe (rehash avec des paramètres plus récents)
    pub async fn upgrade_password(
        db: &DatabaseConnection,
        user: user::Model,
        new_hash: String,
    ) -> Result<user::Model, DbErr> {
        let mut active: user::ActiveModel = user.into();
        active.password = Set(new_hash);
        active.update(db).await
    }

    /// Vérifie les identifiants et renvoie l'utilisateur.
    /// Un hash calculé avec moins d'itérations que l'actuel est remplacé au passage.
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        plain_password: &str,
    ) -> CatalogResult<user::Model> {
        let invalid = || CatalogError::Unauthorized("Identifiants invalides".to_string());

        // 1. Trouver l'utilisateur
        let user = Self::find_by_username(db, username)
            .await?
            .ok_or_else(invalid)?;

        // 2. Vérifier le mot de passe
        let is_valid = password::verify_password(plain_password, &user.password)
            .map_err(CatalogError::Password)?;
        if !is_valid {
            tracing::info!("Échec de connexion pour '{}'", username);
            return Err(invalid());
        }

        // 3. Mettre à niveau le hash si nécessaire
        if password::needs_rehash(&user.password) {
            let new_hash = password::hash_password(plain_password).map_err(CatalogError::Password)?;
            tracing::debug!("Mise à niveau du hash de '{}'", username);
            return Ok(Self::upgrade_password(db, user, new_hash).await?);
        }

        Ok(user)
    }

    /// Crée le compte administrateur s'il n'existe pas encore.
    /// Renvoie true si le compte vient d'être créé.
    pub async fn seed_admin(
        db: &DatabaseConnection,
        username: &str,
        plain_password: &str,
    ) -> CatalogResult<bool> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Ok(false);
        }

        let hash = password::hash_password(plain_password).map_err(CatalogError::Password)?;

        user::ActiveModel {
            username: Set(username.to_string()),
            roles: Set(json!([ROLE_ADMIN])),
            password: Set(hash),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(true)
    }
}
