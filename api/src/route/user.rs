use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    change_password, change_role, get_current_user, list_users, register_user,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", post(register_user))
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
        .route("/:user_id/role", put(change_role));

    Router::new().nest("/users", users_routers)
}
