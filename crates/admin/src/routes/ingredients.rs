//! Ingredient management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use tio_pelotte_core::IngredientId;

use crate::cms::types::{AdminIngredient, IngredientInput};
use crate::error::Result;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Creation response.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: IngredientId,
}

/// All ingredients.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireOperator,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminIngredient>>> {
    let ingredients = state.cms().list_ingredients().await?;
    Ok(Json(ingredients))
}

/// Create an ingredient.
#[instrument(skip(_auth, state, input))]
pub async fn create(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let id = state.cms().create_ingredient(&input).await?;
    tracing::info!(ingredient_id = %id, name = %input.name, "Ingredient created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update an ingredient.
#[instrument(skip(_auth, state, input))]
pub async fn update(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<IngredientId>,
    Json(input): Json<IngredientInput>,
) -> Result<StatusCode> {
    state.cms().update_ingredient(id, &input).await?;
    tracing::info!(ingredient_id = %id, "Ingredient updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an ingredient.
#[instrument(skip(_auth, state))]
pub async fn delete(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<IngredientId>,
) -> Result<StatusCode> {
    state.cms().delete_ingredient(id).await?;
    tracing::info!(ingredient_id = %id, "Ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}
