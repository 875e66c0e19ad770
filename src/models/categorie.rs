use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categorie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // Unicité insensible à la casse vérifiée côté application uniquement
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::formation_categorie::Entity")]
    FormationCategorie,
}

impl Related<super::formation_categorie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormationCategorie.def()
    }
}

impl Related<super::formation::Entity> for Entity {
    fn to() -> RelationDef {
        super::formation_categorie::Relation::Formation.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::formation_categorie::Relation::Categorie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
