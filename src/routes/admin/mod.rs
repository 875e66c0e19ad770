pub mod formations;
pub mod playlists;
pub mod categories;

use actix_web::web;

/// Espace d'administration: chaque handler exige un token portant ROLE_ADMIN
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .configure(formations::formations_routes)
            .configure(playlists::playlists_routes)
            .configure(categories::categories_routes)
    );
}
