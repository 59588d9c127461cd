//! Tag and Location Requests
//!
//! Frontend bindings for the tag and location collections.

use reqwest::Method;
use serde::Serialize;

use super::client::{client, ApiResult};
use crate::models::{Location, Tag};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct CreateTagArgs<'a> {
    pub name: &'a str,
    pub color: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateLocationArgs<'a> {
    name: &'a str,
}

// ========================
// Tags
// ========================

pub async fn list_tags() -> ApiResult<Vec<Tag>> {
    client().get_json("tags", &[]).await
}

pub async fn create_tag(args: &CreateTagArgs<'_>) -> ApiResult<Tag> {
    client().send_json(Method::POST, "tags", args).await
}

// ========================
// Locations
// ========================

pub async fn list_locations() -> ApiResult<Vec<Location>> {
    client().get_json("locations", &[]).await
}

pub async fn create_location(name: &str) -> ApiResult<Location> {
    client()
        .send_json(Method::POST, "locations", &CreateLocationArgs { name })
        .await
}
