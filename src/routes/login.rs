use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::middleware::{AuthUser, RevokedTokens};
use crate::services::user_service::UserService;
use crate::utils::jwt;

// DTO pour la connexion
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Réponse après login
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub roles: Vec<String>,
}

/// GET /login - Utilisateur courant, s'il est déjà connecté
#[get("/login")]
pub async fn login_page(user: Option<AuthUser>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "last_username": user.as_ref().map(|u| u.username.clone()),
        "user": user
    }))
}

/// POST /login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> CatalogResult<HttpResponse> {
    // 1. Vérifier les identifiants
    let user = UserService::authenticate(db.get_ref(), &body.username, &body.password).await?;

    // 2. Générer le JWT avec les rôles
    let roles = user.roles();
    let token = jwt::generate_token(config.get_ref(), user.id, &user.username, roles.clone())
        .map_err(CatalogError::Token)?;

    tracing::info!("Connexion de '{}'", user.username);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
        roles,
    }))
}

/// POST /logout - Révoque le token courant
#[post("/logout")]
pub async fn logout(user: AuthUser, revoked: web::Data<RevokedTokens>) -> HttpResponse {
    revoked.revoke(&user.jti, user.exp);

    tracing::info!(
        "Déconnexion de '{}' ({} token(s) révoqué(s) en mémoire)",
        user.username,
        revoked.len()
    );

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Déconnecté"
    }))
}

pub fn login_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page).service(login).service(logout);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::services::user_service::UserService;
    use crate::test_support::{setup_db, test_app, ADMIN_PASSWORD, ADMIN_USERNAME};

    #[actix_web::test]
    async fn test_login_logout() {
        let db = setup_db().await;
        UserService::seed_admin(&db, ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        let app = test_app!(db);

        // 1. Connexion
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(body["username"], ADMIN_USERNAME);
        assert!(body["roles"].as_array().unwrap().contains(&json!("ROLE_ADMIN")));

        // 2. Session courante
        let req = test::TestRequest::get()
            .uri("/login")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["last_username"], ADMIN_USERNAME);

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // 3. Déconnexion: le token ne donne plus accès à l'administration
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_login_with_bad_credentials() {
        let db = setup_db().await;
        UserService::seed_admin(&db, ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": ADMIN_USERNAME, "password": "mauvais" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_anonymous_session() {
        let db = setup_db().await;
        let app = test_app!(db);

        let req = test::TestRequest::get().uri("/login").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["user"].is_null());

        let req = test::TestRequest::post().uri("/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
