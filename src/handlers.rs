use crate::errors::AppError;
use crate::fixture::{apply_update, claim_on, snapshot_on};
use crate::models::{Snapshot, StateUpdate};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_page;
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDate};
use tokio::fs;
use tracing::info;

pub const PAGE_PATH: &str = "/signin_reward/";

pub async fn index() -> Redirect {
    Redirect::to(PAGE_PATH)
}

pub async fn reward_page(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let snapshot = snapshot_on(&data, today(), &state.config.schedule);
    Html(render_page(&snapshot, &state.config))
}

/// Always lands back on the reward page, like the form post it stands in for.
pub async fn claim(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    if claim_on(&mut data, today(), &state.config.schedule) {
        persist_data(&state.data_path, &data).await?;
        info!(streak = data.streak, "preview claim accepted");
    } else {
        info!("preview claim refused");
    }
    Ok(Redirect::to(PAGE_PATH))
}

pub async fn get_state(State(state): State<AppState>) -> Json<Snapshot> {
    let data = state.data.lock().await;
    Json(snapshot_on(&data, today(), &state.config.schedule))
}

pub async fn update_state(
    State(state): State<AppState>,
    Json(update): Json<StateUpdate>,
) -> Result<Json<Snapshot>, AppError> {
    let today = today();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    apply_update(&mut next, &update, today).map_err(AppError::bad_request)?;
    persist_data(&state.data_path, &next).await?;
    *data = next;
    info!(streak = data.streak, tasks_done = data.tasks_done, "preview state replaced");

    Ok(Json(snapshot_on(&data, today, &state.config.schedule)))
}

pub async fn pkg_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    if !is_plain_file_name(&name) {
        return Err(AppError::not_found("no such file"));
    }
    let bytes = match fs::read(state.pkg_dir.join(&name)).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("no such file"));
        }
        Err(err) => return Err(err.into()),
    };
    Ok(([(header::CONTENT_TYPE, content_type(&name))], bytes).into_response())
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
}

fn content_type(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js") => "text/javascript; charset=utf-8",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_cannot_escape_the_bundle() {
        assert!(is_plain_file_name("signin_toast_bg.wasm"));
        assert!(!is_plain_file_name("../Cargo.toml"));
        assert!(!is_plain_file_name(".env"));
        assert!(!is_plain_file_name(""));
    }

    #[test]
    fn wasm_gets_its_mime_type() {
        assert_eq!(content_type("signin_toast_bg.wasm"), "application/wasm");
        assert_eq!(content_type("signin_toast.js"), "text/javascript; charset=utf-8");
        assert_eq!(content_type("README"), "application/octet-stream");
    }
}
