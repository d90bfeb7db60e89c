use axum::Router;
use domain_products::{PgProductStore, ProductsService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let store = PgProductStore::new(state.db.clone());
    handlers::router(ProductsService::new(store))
}
