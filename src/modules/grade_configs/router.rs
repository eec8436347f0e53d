use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    delete_grade_config, get_grade_config, get_grade_configs, upsert_grade_config,
};

pub fn init_grade_configs_router() -> Router<AppState> {
    Router::new().route("/", get(get_grade_configs)).route(
        "/{subject}",
        get(get_grade_config)
            .put(upsert_grade_config)
            .delete(delete_grade_config),
    )
}
