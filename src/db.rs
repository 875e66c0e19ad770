// connexion BD et création du schéma

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};
use sea_orm::sea_query::TableCreateStatement;

use crate::config::Config;
use crate::models::{categorie, formation, formation_categorie, playlist, user};

pub async fn establish_connection(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// Crée les tables manquantes à partir des entités.
/// Ordre imposé par les clés étrangères: playlist et categorie avant formation.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        table(&schema, playlist::Entity),
        table(&schema, categorie::Entity),
        table(&schema, user::Entity),
        table(&schema, formation::Entity),
        table(&schema, formation_categorie::Entity),
    ];

    for statement in statements {
        db.execute(backend.build(&statement)).await?;
    }

    tracing::info!("Schéma de la base vérifié");
    Ok(())
}

fn table<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned()
}
