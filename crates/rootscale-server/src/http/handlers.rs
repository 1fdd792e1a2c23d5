// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::{internal_error_response, store_error_response};
use crate::http::forms::{resolve_group_choice, FormFields};
use crate::http::view::{render_index, IndexView};
use crate::{AppState, CRATE_NAME};
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use rootscale_model::{parse_number, scale_by_sqrt2, sorted_groups, OpenGroups};
use rootscale_store::{DimensionStore, StoreError};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderRequest {
    pub order: Vec<i64>,
}

/// Runs a blocking store call off the async workers and turns failures into
/// a JSON 500.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&DimensionStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = state.store.clone();
    match tokio::task::spawn_blocking(move || f(&store)).await {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(e)) => Err(store_error_response(&e)),
        Err(e) => Err(internal_error_response(&format!("store task failed: {e}"))),
    }
}

fn redirect_home(open: &OpenGroups) -> Response {
    Redirect::to(&open.location()).into_response()
}

pub(crate) async fn index_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let open = FormFields::from_query(query.as_deref()).open_groups("open");
    let number = if method == Method::POST {
        FormFields::parse(&body)
            .get("number")
            .and_then(parse_number)
    } else {
        None
    };
    let result = number.map(scale_by_sqrt2);
    if let (Some(n), Some(r)) = (number, result) {
        debug!(number = n, result = r, "computed sqrt2 product");
    }

    let records = match with_store(&state, DimensionStore::snapshot).await {
        Ok(records) => records,
        Err(resp) => return resp,
    };
    let groups = sorted_groups(&records);
    Html(render_index(&IndexView {
        number,
        result,
        records: &records,
        groups: &groups,
        open: &open,
    }))
    .into_response()
}

pub(crate) async fn save_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let form = FormFields::parse(&body);
    let mut open = form.open_groups("open_groups");
    let (group, is_new) = resolve_group_choice(&form);
    if is_new {
        open.open_group(&group);
    }

    let name = form.non_empty("dimension_name").map(ToString::to_string);
    let value = form.non_empty("value").and_then(parse_number);
    match (name, value) {
        (Some(name), Some(value)) => {
            let added = match with_store(&state, move |s| s.add(&name, value, &group)).await {
                Ok(rec) => rec,
                Err(resp) => return resp,
            };
            info!(name = %added.name, value = added.value, group = %added.group, "dimension added");
        }
        _ => debug!("save ignored: missing name or non-numeric value"),
    }
    redirect_home(&open)
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let form = FormFields::parse(&body);
    let mut open = form.open_groups("open_groups");
    for slug in FormFields::from_query(query.as_deref()).get_all("open") {
        open.insert(slug);
    }

    let removed = match with_store(&state, move |s| s.delete(index)).await {
        Ok(removed) => removed,
        Err(resp) => return resp,
    };
    if let Some(rec) = removed {
        info!(index, name = %rec.name, group = %rec.group, "dimension deleted");
        open.open_group(&rec.group);
    }
    redirect_home(&open)
}

pub(crate) async fn rename_handler(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    body: Bytes,
) -> Response {
    let form = FormFields::parse(&body);
    let open = form.open_groups("open_groups");
    if let Some(new_name) = form.non_empty("new_name").map(ToString::to_string) {
        let renamed = match with_store(&state, move |s| s.rename(index, &new_name)).await {
            Ok(renamed) => renamed,
            Err(resp) => return resp,
        };
        info!(index, renamed, "dimension rename");
    }
    redirect_home(&open)
}

pub(crate) async fn update_group_handler(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    body: Bytes,
) -> Response {
    let form = FormFields::parse(&body);
    let mut open = form.open_groups("open_groups");
    let (group, is_new) = resolve_group_choice(&form);
    if is_new {
        open.open_group(&group);
    }
    let updated = match with_store(&state, move |s| s.update_group(index, &group)).await {
        Ok(updated) => updated,
        Err(resp) => return resp,
    };
    info!(index, updated, "dimension group change");
    redirect_home(&open)
}

/// Opens a group panel without storing anything; the group only becomes
/// real once a dimension is saved into it.
pub(crate) async fn add_group_handler(body: Bytes) -> Response {
    let form = FormFields::parse(&body);
    let mut open = form.open_groups("open_groups");
    if let Some(name) = form.non_empty("group_name") {
        open.open_group(name);
    }
    redirect_home(&open)
}

fn parse_reorder(body: &[u8]) -> Option<ReorderRequest> {
    match serde_json::from_slice::<ReorderRequest>(body) {
        Ok(req) => Some(req),
        Err(e) => {
            debug!(error = %e, "reorder body rejected");
            None
        }
    }
}

fn success(ok: bool) -> Response {
    Json(json!({ "success": ok })).into_response()
}

pub(crate) async fn reorder_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(req) = parse_reorder(&body) else {
        return success(false);
    };
    match with_store(&state, move |s| s.reorder_dimensions(&req.order)).await {
        Ok(ok) => {
            info!(success = ok, "dimension reorder");
            success(ok)
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn reorder_groups_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let Some(req) = parse_reorder(&body) else {
        return success(false);
    };
    match with_store(&state, move |s| s.reorder_groups(&req.order)).await {
        Ok(ok) => {
            info!(success = ok, "group reorder");
            success(ok)
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
