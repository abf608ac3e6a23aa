use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::registration::{cancel_registration, show_my_registrations};

pub fn build_registration_routers() -> Router<AppRegistry> {
    let registrations_routers = Router::new()
        .route("/me", get(show_my_registrations))
        .route("/:registration_id/cancel", put(cancel_registration));

    Router::new().nest("/registrations", registrations_routers)
}
