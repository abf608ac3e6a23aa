use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::event::{
    delete_event, event_calendar, register_event, show_event, show_event_list, update_event,
};
use crate::handler::registration::register_for_event;

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", post(register_event))
        .route("/", get(show_event_list))
        .route("/:event_id", get(show_event))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event))
        .route("/:event_id/calendar", get(event_calendar))
        .route("/:event_id/registrations", post(register_for_event));

    Router::new().nest("/events", events_routers)
}
