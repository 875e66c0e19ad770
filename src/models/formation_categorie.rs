use sea_orm::entity::prelude::*;

// Table de jointure formation <-> categorie
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "formation_categorie")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub formation_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub categorie_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::formation::Entity",
        from = "Column::FormationId",
        to = "super::formation::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Formation,
    #[sea_orm(
        belongs_to = "super::categorie::Entity",
        from = "Column::CategorieId",
        to = "super::categorie::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categorie,
}

impl Related<super::formation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Formation.def()
    }
}

impl Related<super::categorie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
