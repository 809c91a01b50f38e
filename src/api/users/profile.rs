use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbConn;
use crate::error::ApiError;
use crate::models::User;
use crate::relations::{Relation, Subscriptions};
use crate::schema::users;

/// Public profile of a user, decorated with `is_subscribed` relative to an
/// optional viewer. Anonymous viewers always see `false`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

pub fn find_user(conn: &mut DbConn, id: Uuid) -> Result<User, ApiError> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("User not found"))
}

pub fn build_profile(
    conn: &mut DbConn,
    viewer: Option<Uuid>,
    user: &User,
) -> Result<UserProfile, ApiError> {
    let is_subscribed = match viewer {
        Some(v) if v != user.id => Subscriptions::exists(conn, v, user.id)?,
        _ => false,
    };

    Ok(UserProfile {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed,
        avatar: user.avatar.clone(),
    })
}
