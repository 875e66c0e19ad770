use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

/// Tokens révoqués par une déconnexion, jusqu'à leur expiration
#[derive(Debug, Default)]
pub struct RevokedTokens {
    // jti -> timestamp d'expiration
    tokens: RwLock<HashMap<String, i64>>,
}

impl RevokedTokens {
    pub fn revoke(&self, jti: &str, exp: i64) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());

        // Nettoyage paresseux des tokens déjà expirés
        let now = Utc::now().timestamp();
        tokens.retain(|_, expires_at| *expires_at > now);

        tokens.insert(jti.to_string(), exp);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(jti)
    }

    pub fn len(&self) -> usize {
        self.tokens.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
