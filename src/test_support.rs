// Base SQLite en mémoire et jeu de données partagés par les tests
use chrono::NaiveDate;
use sea_orm::*;

use crate::config::Config;
use crate::db;
use crate::models::user::ROLE_USER;
use crate::models::{categorie, formation, formation_categorie, playlist};
use crate::services::user_service::UserService;
use crate::utils::jwt;

pub const PLAYLIST_BASES: i32 = 1;
pub const PLAYLIST_VISUAL_STUDIO: i32 = 2;
pub const PLAYLIST_CURSEURS: i32 = 3;
pub const PLAYLIST_ECLIPSE: i32 = 4;
pub const PLAYLIST_VIDE: i32 = 5;

pub const CATEGORIE_JAVA: i32 = 1;
pub const CATEGORIE_UML: i32 = 2;
pub const CATEGORIE_CSHARP: i32 = 3;
pub const CATEGORIE_ANDROID: i32 = 4;
pub const CATEGORIE_SQL: i32 = 5;
pub const CATEGORIE_POO: i32 = 6;

pub const NB_FORMATIONS: u64 = 17;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

const PLAYLISTS: [(i32, &str); 5] = [
    (PLAYLIST_BASES, "Bases de la programmation (C#)"),
    (PLAYLIST_VISUAL_STUDIO, "Visual Studio 2019 et C#"),
    (PLAYLIST_CURSEURS, "Cours Curseurs"),
    (PLAYLIST_ECLIPSE, "Eclipse et Java"),
    (PLAYLIST_VIDE, "Playlist test"),
];

const CATEGORIES: [(i32, &str); 6] = [
    (CATEGORIE_JAVA, "Java"),
    (CATEGORIE_UML, "UML"),
    (CATEGORIE_CSHARP, "C#"),
    (CATEGORIE_ANDROID, "Android"),
    (CATEGORIE_SQL, "SQL"),
    (CATEGORIE_POO, "POO"),
];

// (titre, date de publication, playlist, catégories)
const FORMATIONS: [(&str, (i32, u32, u32), i32, &[i32]); 17] = [
    ("Eclipse n°8 : Déploiement", (2020, 1, 10), PLAYLIST_ECLIPSE, &[CATEGORIE_JAVA]),
    (
        "Android Studio (complément n°1) : Navigation Drawer et Fragment",
        (2019, 5, 10),
        PLAYLIST_ECLIPSE,
        &[CATEGORIE_ANDROID, CATEGORIE_JAVA],
    ),
    ("UML : Diagramme de paquetages", (2018, 2, 1), PLAYLIST_ECLIPSE, &[CATEGORIE_UML]),
    (
        "Cours Curseurs(1 à 4 / 8) : curseurs et SGBDR",
        (2017, 3, 1),
        PLAYLIST_CURSEURS,
        &[CATEGORIE_SQL],
    ),
    (
        "Cours Curseurs(5 à 8 / 8) : curseur historique et curseur dans le SGBDR",
        (2017, 4, 1),
        PLAYLIST_CURSEURS,
        &[CATEGORIE_SQL],
    ),
    ("C# : ListBox en couleur", (2021, 6, 1), PLAYLIST_VISUAL_STUDIO, &[CATEGORIE_CSHARP]),
    ("C# : sérialisation d'objets", (2021, 5, 1), PLAYLIST_VISUAL_STUDIO, &[CATEGORIE_CSHARP]),
    (
        "C# : héritage et polymorphisme",
        (2021, 4, 1),
        PLAYLIST_VISUAL_STUDIO,
        &[CATEGORIE_CSHARP, CATEGORIE_POO],
    ),
    (
        "C# : interfaces",
        (2021, 3, 1),
        PLAYLIST_VISUAL_STUDIO,
        &[CATEGORIE_CSHARP, CATEGORIE_POO],
    ),
    ("C# : gestion des exceptions", (2021, 2, 1), PLAYLIST_VISUAL_STUDIO, &[CATEGORIE_CSHARP]),
    (
        "Bases de la programmation n°70 - C# : tableaux",
        (2016, 9, 25),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP],
    ),
    (
        "Bases de la programmation n°71 - C# : boucles",
        (2016, 10, 2),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP],
    ),
    (
        "Bases de la programmation n°72 - C# : fonctions",
        (2016, 10, 9),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP],
    ),
    (
        "Bases de la programmation n°73 - C# : classes",
        (2016, 10, 16),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP, CATEGORIE_POO],
    ),
    (
        "Bases de la programmation n°74 - POO : collections",
        (2016, 10, 23),
        PLAYLIST_BASES,
        &[CATEGORIE_POO],
    ),
    (
        "Bases de la programmation n°75 - C# : fichiers",
        (2016, 10, 30),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP],
    ),
    (
        "Bases de la programmation n°76 - C# : LINQ",
        (2016, 11, 6),
        PLAYLIST_BASES,
        &[CATEGORIE_CSHARP],
    ),
];

/// Base en mémoire avec le schéma et le jeu de données.
/// Une seule connexion: chaque connexion SQLite :memory: est une base distincte.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("sqlite en mémoire");
    // LIKE sensible à la casse, comme sous PostgreSQL
    db.execute_unprepared("PRAGMA case_sensitive_like = ON")
        .await
        .expect("pragma case_sensitive_like");
    db::create_schema(&db).await.expect("création du schéma");

    playlist::Entity::insert_many(PLAYLISTS.iter().map(|(id, name)| playlist::ActiveModel {
        id: Set(*id),
        name: Set(Some(ToString::to_string(&name))),
        description: Set(Some(format!("Description de {}", name))),
    }))
    .exec_without_returning(&db)
    .await
    .expect("insertion des playlists");

    categorie::Entity::insert_many(CATEGORIES.iter().map(|(id, name)| categorie::ActiveModel {
        id: Set(*id),
        name: Set(Some(ToString::to_string(&name))),
    }))
    .exec_without_returning(&db)
    .await
    .expect("insertion des catégories");

    let formations = FORMATIONS.iter().enumerate().map(|(i, (title, (y, m, d), playlist_id, _))| {
        formation::ActiveModel {
            id: Set(i as i32 + 1),
            published_at: Set(NaiveDate::from_ymd_opt(*y, *m, *d).and_then(|d| d.and_hms_opt(0, 0, 0))),
            title: Set(Some(ToString::to_string(&title))),
            description: Set(Some(format!("Vidéo: {}", title))),
            video_id: Set(Some(format!("vid{:02}", i + 1))),
            playlist_id: Set(Some(*playlist_id)),
        }
    });
    formation::Entity::insert_many(formations)
        .exec_without_returning(&db)
        .await
        .expect("insertion des formations");

    let links = FORMATIONS.iter().enumerate().flat_map(|(i, (_, _, _, categories))| {
        categories.iter().map(move |categorie_id| formation_categorie::ActiveModel {
            formation_id: Set(i as i32 + 1),
            categorie_id: Set(*categorie_id),
        })
    });
    formation_categorie::Entity::insert_many(links)
        .exec_without_returning(&db)
        .await
        .expect("insertion des liens formation_categorie");

    db
}

/// Identifiant d'une formation du jeu de données à partir de son titre
pub fn formation_id(title: &str) -> i32 {
    FORMATIONS
        .iter()
        .position(|(t, _, _, _)| *t == title)
        .map(|i| i as i32 + 1)
        .expect("formation du jeu de données")
}

/// Crée le compte admin et renvoie un token ROLE_ADMIN valide
pub async fn admin_token(db: &DatabaseConnection) -> String {
    UserService::seed_admin(db, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("création de l'admin");
    let user = UserService::authenticate(db, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("authentification de l'admin");

    jwt::generate_token(&Config::for_tests(), user.id, &user.username, user.roles())
        .expect("token admin")
}

/// Token d'un utilisateur sans ROLE_ADMIN
pub fn user_token() -> String {
    jwt::generate_token(&Config::for_tests(), 99, "visiteur", vec![ROLE_USER.to_string()])
        .expect("token utilisateur")
}

/// Application complète (routes, base, configuration de test)
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new($crate::config::Config::for_tests()))
                .app_data(actix_web::web::Data::new(
                    $crate::middleware::RevokedTokens::default(),
                ))
                .configure($crate::routes::configure_routes),
        )
        .await
    };
}

pub(crate) use test_app;
