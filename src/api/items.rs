//! Item Requests
//!
//! Bindings for item CRUD, attachment upload and export.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use wasm_bindgen_futures::JsFuture;

use super::client::{client, ApiError, ApiResult};
use crate::editor::{ItemBackend, ItemPayload};
use crate::models::{join_ids, ExportFormat, Item, ItemPage, ItemQuery};

// ========================
// Item CRUD
// ========================

pub async fn list_items(query: &ItemQuery) -> ApiResult<ItemPage> {
    client().get_json("items", &query.to_params()).await
}

pub async fn get_item(id: u32) -> ApiResult<Item> {
    client().get_json(&format!("items/{}", id), &[]).await
}

pub async fn create_item(payload: &ItemPayload) -> ApiResult<Item> {
    client().send_json(Method::POST, "items", payload).await
}

pub async fn update_item(id: u32, payload: &ItemPayload) -> ApiResult<Item> {
    client().send_json(Method::PUT, &format!("items/{}", id), payload).await
}

pub async fn delete_item(id: u32) -> ApiResult<()> {
    client().delete(&format!("items/{}", id)).await
}

/// Delete several items one after another; returns the ids that failed
pub async fn delete_items(ids: &[u32]) -> Vec<u32> {
    let mut failed = Vec::new();
    for &id in ids {
        if let Err(e) = delete_item(id).await {
            log::warn!("deleting item {} failed: {}", id, e);
            failed.push(id);
        }
    }
    failed
}

// ========================
// Attachments
// ========================

async fn read_file(file: &web_sys::File) -> ApiResult<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::FileRead(file.name()))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub async fn upload_attachment(item_id: u32, file: &web_sys::File) -> ApiResult<()> {
    let bytes = read_file(file).await?;
    let mut part = Part::bytes(bytes).file_name(file.name());
    let mime = file.type_();
    if !mime.is_empty() {
        part = part.mime_str(&mime).map_err(|e| ApiError::FileRead(e.to_string()))?;
    }
    let form = Form::new().part("file", part);
    client()
        .post_multipart(&format!("items/{}/attachments", item_id), form)
        .await
}

// ========================
// Export
// ========================

/// Export the filtered items, or only `selected` when non-empty
pub async fn export_items(query: &ItemQuery, selected: &[u32], format: ExportFormat) -> ApiResult<Vec<u8>> {
    let mut params = query.filter_params();
    params.push(("format", format.as_param().to_string()));
    if !selected.is_empty() {
        params.push(("ids", join_ids(selected)));
    }
    client().get_bytes("items/export", &params).await
}

// ========================
// Save flow backend
// ========================

/// `ItemBackend` talking to the REST API
pub struct RestBackend;

#[async_trait(?Send)]
impl ItemBackend for RestBackend {
    type File = web_sys::File;

    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ApiError> {
        create_item(payload).await
    }

    async fn update_item(&self, id: u32, payload: &ItemPayload) -> Result<Item, ApiError> {
        update_item(id, payload).await
    }

    async fn upload_attachment(&self, item_id: u32, file: &web_sys::File) -> Result<(), ApiError> {
        upload_attachment(item_id, file).await
    }
}
