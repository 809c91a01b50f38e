//! Generic add/remove toggle over the three (user, target) relation tables:
//! favorites, shopping cart and subscriptions. One implementation, three
//! instantiations, so all three share identical semantics. The database
//! enforces the pair uniqueness; the `exists` pre-check only exists to turn
//! a duplicate add into a friendly message instead of a raw constraint error.

use diesel::dsl::exists;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbConn;
use crate::error::ApiError;
use crate::models::{NewCartItem, NewFavorite, NewSubscription};
use crate::schema::{favorites, shopping_cart, subscriptions};

pub trait Relation {
    /// Message for an add when the row is already present.
    const ERR_EXISTS: &'static str;
    /// Message for a remove when the row is missing.
    const ERR_MISSING: &'static str;

    fn exists(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<bool>;
    fn insert(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize>;
    fn delete(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize>;
}

pub fn add<R: Relation>(conn: &mut DbConn, user: Uuid, target: Uuid) -> Result<(), ApiError> {
    if R::exists(conn, user, target)? {
        return Err(ApiError::AlreadyExists(R::ERR_EXISTS));
    }
    R::insert(conn, user, target)?;
    Ok(())
}

pub fn remove<R: Relation>(conn: &mut DbConn, user: Uuid, target: Uuid) -> Result<(), ApiError> {
    if R::delete(conn, user, target)? == 0 {
        return Err(ApiError::NotFound(R::ERR_MISSING));
    }
    Ok(())
}

pub struct Favorites;

impl Relation for Favorites {
    const ERR_EXISTS: &'static str = "Recipe is already in favorites";
    const ERR_MISSING: &'static str = "Recipe is not in favorites";

    fn exists(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<bool> {
        diesel::select(exists(
            favorites::table
                .filter(favorites::user_id.eq(user))
                .filter(favorites::recipe_id.eq(target)),
        ))
        .get_result(conn)
    }

    fn insert(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::insert_into(favorites::table)
            .values(&NewFavorite {
                user_id: user,
                recipe_id: target,
            })
            .execute(conn)
    }

    fn delete(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user))
                .filter(favorites::recipe_id.eq(target)),
        )
        .execute(conn)
    }
}

pub struct Cart;

impl Relation for Cart {
    const ERR_EXISTS: &'static str = "Recipe is already in the shopping cart";
    const ERR_MISSING: &'static str = "Recipe is not in the shopping cart";

    fn exists(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<bool> {
        diesel::select(exists(
            shopping_cart::table
                .filter(shopping_cart::user_id.eq(user))
                .filter(shopping_cart::recipe_id.eq(target)),
        ))
        .get_result(conn)
    }

    fn insert(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::insert_into(shopping_cart::table)
            .values(&NewCartItem {
                user_id: user,
                recipe_id: target,
            })
            .execute(conn)
    }

    fn delete(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::delete(
            shopping_cart::table
                .filter(shopping_cart::user_id.eq(user))
                .filter(shopping_cart::recipe_id.eq(target)),
        )
        .execute(conn)
    }
}

pub struct Subscriptions;

impl Relation for Subscriptions {
    const ERR_EXISTS: &'static str = "Already subscribed to this author";
    const ERR_MISSING: &'static str = "Not subscribed to this author";

    fn exists(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<bool> {
        diesel::select(exists(
            subscriptions::table
                .filter(subscriptions::user_id.eq(user))
                .filter(subscriptions::author_id.eq(target)),
        ))
        .get_result(conn)
    }

    fn insert(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::insert_into(subscriptions::table)
            .values(&NewSubscription {
                user_id: user,
                author_id: target,
            })
            .execute(conn)
    }

    fn delete(conn: &mut DbConn, user: Uuid, target: Uuid) -> QueryResult<usize> {
        diesel::delete(
            subscriptions::table
                .filter(subscriptions::user_id.eq(user))
                .filter(subscriptions::author_id.eq(target)),
        )
        .execute(conn)
    }
}
