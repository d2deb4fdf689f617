use crate::modules::posts::controller::{
    create_post, create_post_form, delete_post, list_posts, post_detail, update_post,
    update_post_form,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_posts_router() -> Router<AppState> {
    Router::new()
        .route("/post/", get(list_posts))
        .route("/post/create/", get(create_post_form).post(create_post))
        .route("/post/{slug}/detail/", get(post_detail))
        .route("/post/{slug}/update/", get(update_post_form).post(update_post))
        .route("/post/{slug}/delete/", get(delete_post))
}
