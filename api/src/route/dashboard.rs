use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::dashboard::event_registrations;

pub fn build_dashboard_routers() -> Router<AppRegistry> {
    let dashboard_routers = Router::new().route("/registrations", get(event_registrations));

    Router::new().nest("/dashboard", dashboard_routers)
}
