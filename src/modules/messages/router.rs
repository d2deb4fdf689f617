use crate::modules::messages::controller::{list_messages, message_detail};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_messages_router() -> Router<AppState> {
    Router::new()
        .route("/message/", get(list_messages))
        .route("/message/{id}/detail/", get(message_detail))
}
