use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{create_attendance, delete_attendance, get_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_attendance).get(get_attendance))
        .route("/{id}", delete(delete_attendance))
}
