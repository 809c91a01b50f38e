pub mod avatar;
pub mod get;
pub mod list;
pub mod me;
pub mod profile;
pub mod signup;
pub mod subscribe;
pub mod subscriptions;

use crate::AppState;
use axum::routing::{get as get_method, post, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get_method(list::list_users).post(signup::signup))
        .route("/me", get_method(me::me))
        .route(
            "/me/avatar",
            put(avatar::set_avatar).delete(avatar::delete_avatar),
        )
        .route("/subscriptions", get_method(subscriptions::list_subscriptions))
        .route("/{id}", get_method(get::get_user))
        .route(
            "/{id}/subscribe",
            post(subscribe::subscribe).delete(subscribe::unsubscribe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_users,
        signup::signup,
        me::me,
        get::get_user,
        avatar::set_avatar,
        avatar::delete_avatar,
        subscriptions::list_subscriptions,
        subscribe::subscribe,
        subscribe::unsubscribe
    ),
    components(schemas(
        profile::UserProfile,
        signup::SignupRequest,
        signup::SignupResponse,
        list::ListUsersResponse,
        avatar::SetAvatarRequest,
        avatar::SetAvatarResponse,
        subscriptions::SubscriptionResponse,
        subscriptions::SubscriptionsPage,
    ))
)]
pub struct ApiDoc;
