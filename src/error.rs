use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use validator::ValidationErrors;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Erreurs remontées par les services et les routes
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} introuvable")]
    NotFound(&'static str),

    #[error("Tri impossible sur le champ '{field}'{}", table_suffix(.table))]
    InvalidSortKey { field: String, table: Option<String> },

    #[error("Recherche impossible sur le champ '{field}'{}", table_suffix(.table))]
    InvalidSearchKey { field: String, table: Option<String> },

    #[error("Ordre de tri invalide: '{0}' (attendu: asc ou desc)")]
    InvalidOrder(String),

    #[error("Valeur de recherche invalide: '{0}'")]
    InvalidSearchValue(String),

    #[error("Référence invalide: {0}")]
    InvalidReference(String),

    #[error("Formulaire invalide")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Accès réservé aux administrateurs")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Token error: {0}")]
    Token(String),
}

fn table_suffix(table: &Option<String>) -> String {
    table.as_ref().map(|t| format!(" de '{}'", t)).unwrap_or_default()
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidSortKey { .. }
            | CatalogError::InvalidSearchKey { .. }
            | CatalogError::InvalidOrder(_)
            | CatalogError::InvalidSearchValue(_)
            | CatalogError::InvalidReference(_)
            | CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CatalogError::Forbidden => StatusCode::FORBIDDEN,
            CatalogError::Database(_) | CatalogError::Password(_) | CatalogError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        match self {
            // Erreurs de formulaire: messages par champ, rien n'est enregistré
            CatalogError::Validation(errors) => {
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errs)| {
                        let messages: Vec<String> = errs
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        (field.to_string(), serde_json::json!(messages))
                    })
                    .collect();

                HttpResponse::build(status).json(serde_json::json!({
                    "error": self.to_string(),
                    "fields": fields
                }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}
