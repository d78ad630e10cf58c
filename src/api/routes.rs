use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::api::handlers;
use crate::model::{Artwork, Exhibition, Series};
use crate::store::Storage;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_router<S: Storage>() -> Router<handlers::AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Artworks
        .route(
            "/api/artworks",
            get(handlers::list_artworks::<S>).post(handlers::create_record::<S, Artwork>),
        )
        .route(
            "/api/artworks/:id",
            get(handlers::get_record::<S, Artwork>)
                .patch(handlers::update_record::<S, Artwork>)
                .delete(handlers::delete_record::<S, Artwork>),
        )
        // Exhibitions
        .route(
            "/api/exhibitions",
            get(handlers::list_exhibitions::<S>).post(handlers::create_record::<S, Exhibition>),
        )
        .route(
            "/api/exhibitions/:id",
            get(handlers::get_record::<S, Exhibition>)
                .patch(handlers::update_record::<S, Exhibition>)
                .delete(handlers::delete_record::<S, Exhibition>),
        )
        // Series
        .route(
            "/api/series",
            get(handlers::list_series::<S>).post(handlers::create_record::<S, Series>),
        )
        .route(
            "/api/series/:id",
            get(handlers::get_record::<S, Series>)
                .patch(handlers::update_record::<S, Series>)
                .delete(handlers::delete_series::<S>),
        )
        .route("/api/series/:id/usage", get(handlers::get_series_usage::<S>))
        // Contact (singleton)
        .route(
            "/api/contact",
            get(handlers::get_contact::<S>).patch(handlers::update_contact::<S>),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
