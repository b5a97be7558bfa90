use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::waiting::{delete_waiting, register_waiting, show_my_waiting_list};

pub fn build_waiting_routers() -> Router<AppRegistry> {
    let waiting_routers = Router::new()
        .route("/", post(register_waiting))
        .route("/mine", get(show_my_waiting_list))
        .route("/:waiting_id", delete(delete_waiting));

    Router::new().nest("/waitings", waiting_routers)
}
