use axum::Router;
use domain_users::{PgUserStore, UsersService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let store = PgUserStore::new(state.db.clone());
    handlers::router(UsersService::new(store))
}
