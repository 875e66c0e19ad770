use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

/// Rôle attribué implicitement à tout utilisateur
pub const ROLE_USER: &str = "ROLE_USER";
/// Rôle requis pour l'espace d'administration
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub roles: Json, // Liste JSON: ["ROLE_ADMIN"]
    #[serde(skip_serializing)] // Ne jamais exposer le hash en JSON
    pub password: String, // Format: pbkdf2:sha256:iterations$salt$hash
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Rôles de l'utilisateur, ROLE_USER toujours inclus, sans doublon
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self
            .roles
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        roles.push(ROLE_USER.to_string());

        let mut seen = std::collections::HashSet::new();
        roles.retain(|role| seen.insert(role.clone()));
        roles
    }
}

impl ActiveModelBehavior for ActiveModel {}
