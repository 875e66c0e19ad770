use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::CatalogError;
use crate::middleware::RevokedTokens;
use crate::models::user::ROLE_ADMIN;
use crate::utils::jwt;

/// Structure qui contient les infos de l'utilisateur authentifié
/// Utilisée comme extracteur dans les routes protégées
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub roles: Vec<String>,
    #[serde(skip)]
    pub jti: String,
    #[serde(skip)]
    pub exp: i64,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }
}

/// Utilisateur authentifié ayant le rôle ROLE_ADMIN (espace d'administration)
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Into::into))
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|user| {
            if user.is_admin() {
                Ok(AdminUser(user))
            } else {
                tracing::info!("Accès admin refusé à '{}'", user.username);
                Err(CatalogError::Forbidden)
            }
        });

        ready(result.map_err(Into::into))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, CatalogError> {
    let unauthorized = |msg: &str| CatalogError::Unauthorized(msg.to_string());

    // 1. Extraire le header Authorization
    let auth_header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    // 2. Convertir le header en string
    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    // 3. Extraire le token (format: "Bearer <token>")
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format (expected: Bearer <token>)"))?;

    // 4. Vérifier le token JWT
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| CatalogError::Token("Configuration missing".to_string()))?;

    let claims = jwt::verify_token(config, token).map_err(|e| unauthorized(&e))?;

    // 5. Refuser un token révoqué par une déconnexion
    if let Some(revoked) = req.app_data::<web::Data<RevokedTokens>>() {
        if revoked.is_revoked(&claims.jti) {
            return Err(unauthorized("Token revoked"));
        }
    }

    Ok(AuthUser {
        user_id: claims.sub,
        username: claims.username,
        roles: claims.roles,
        jti: claims.jti,
        exp: claims.exp,
    })
}
