//! Item List Requests

use reqwest::Method;
use serde::Serialize;

use super::client::{client, ApiResult};
use super::ItemIdsArgs;
use crate::models::ItemList;

#[derive(Serialize)]
pub struct ListArgs<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

pub async fn list_lists() -> ApiResult<Vec<ItemList>> {
    client().get_json("lists", &[]).await
}

pub async fn create_list(args: &ListArgs<'_>) -> ApiResult<ItemList> {
    client().send_json(Method::POST, "lists", args).await
}

pub async fn update_list(id: u32, args: &ListArgs<'_>) -> ApiResult<ItemList> {
    client().send_json(Method::PUT, &format!("lists/{}", id), args).await
}

pub async fn delete_list(id: u32) -> ApiResult<()> {
    client().delete(&format!("lists/{}", id)).await
}

/// Add items to a list; returns the updated list
pub async fn add_items_to_list(list_id: u32, item_ids: &[u32]) -> ApiResult<ItemList> {
    client()
        .send_json(Method::POST, &format!("lists/{}/items", list_id), &ItemIdsArgs { item_ids })
        .await
}
