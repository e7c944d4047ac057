use std::{fmt::Display, result};

use mythmap_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, catch, catchers, delete, get,
    http::Status,
    patch, post,
    response::{self, Responder},
    routes, Catcher, Request, Route, State,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{prelude::*, usecases},
    web::sqlite,
};
use mythmap_application::prelude as flows;

mod comments;
mod error;
mod images;
mod moderation;
mod notes;
mod places;
mod users;
mod util;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<T>, ApiError>;
type CreatedResult<T> = result::Result<(Status, Json<T>), ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   places   --- //
        places::get_places,
        places::get_nearest_places,
        places::get_favorite_places,
        places::get_place,
        places::post_place,
        places::patch_place,
        places::delete_place,
        places::post_toggle_favorite,
        // ---   notes   --- //
        notes::get_notes,
        notes::get_note,
        notes::post_note,
        notes::patch_note,
        notes::delete_note,
        // ---   comments   --- //
        comments::get_comments,
        comments::get_comment,
        comments::post_comment,
        comments::patch_comment,
        comments::delete_comment,
        // ---   moderation   --- //
        moderation::approve_place,
        moderation::reject_place,
        moderation::approve_note,
        moderation::reject_note,
        moderation::approve_comment,
        moderation::reject_comment,
        moderation::get_pending_places,
        moderation::get_pending_notes,
        moderation::get_pending_comments,
        // ---   images   --- //
        images::post_place_image,
        images::delete_place_image,
        images::post_note_image,
        images::delete_note_image,
        // ---   users   --- //
        users::post_register,
        users::post_login,
        users::post_logout,
        users::get_profile,
        users::patch_user_role,
        // ---   util   --- //
        util::get_version,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, unprocessable_entity, internal_error]
}

#[catch(404)]
fn not_found() -> Json<JsonErrorResponse> {
    Json(JsonErrorResponse {
        http_status: Status::NotFound.code,
        message: "Not found.".into(),
    })
}

#[catch(422)]
fn unprocessable_entity() -> Json<JsonErrorResponse> {
    Json(JsonErrorResponse {
        http_status: Status::UnprocessableEntity.code,
        message: "Unprocessable entity.".into(),
    })
}

#[catch(500)]
fn internal_error() -> Json<JsonErrorResponse> {
    Json(JsonErrorResponse {
        http_status: Status::InternalServerError.code,
        message: "Internal server error.".into(),
    })
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

/// Comma separated and repeated query parameters.
fn split_values(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}

fn parse_order<F>(ordering: Option<&str>) -> result::Result<Option<SortOrder<F>>, ApiError>
where
    F: std::str::FromStr,
{
    ordering
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<SortOrder<F>>())
        .transpose()
        .map_err(|err| usecases::Error::from(err).into())
}
