use crate::modules::users::controller::{
    create_user, create_user_form, delete_user, list_users, update_user, update_user_form,
    user_detail,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/user/", get(list_users))
        .route("/user/create/", get(create_user_form).post(create_user))
        .route("/user/{email}/detail/", get(user_detail))
        .route("/user/{email}/update/", get(update_user_form).post(update_user))
        .route("/user/{email}/delete/", get(delete_user))
}
