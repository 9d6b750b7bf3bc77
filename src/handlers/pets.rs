//! Protected pet resources.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Pet;

use super::http::AppState;

/// Client-facing pet shape. `photo` stays internal.
#[derive(Debug, Serialize)]
pub struct PetInfo {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub colour_and_identifying_marks: String,
}

impl From<Pet> for PetInfo {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            date_of_birth: pet.date_of_birth,
            species: pet.species,
            breed: pet.breed,
            sex: pet.sex,
            colour_and_identifying_marks: pet.colour_and_identifying_marks,
        }
    }
}

/// GET /pets — all pets, requires a valid token.
pub async fn list_pets(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let pets: Vec<PetInfo> = state
        .pets
        .list()
        .await?
        .into_iter()
        .map(PetInfo::from)
        .collect();
    Ok(Json(json!({ "pets": pets })))
}

/// GET /pet/:id — a single pet, requires a valid token.
pub async fn get_pet(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(pet_id): Path<i64>,
) -> Result<Json<PetInfo>, AppError> {
    let pet = state
        .pets
        .find_by_id(pet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Sorry, Pet does not exist.".to_string()))?;
    Ok(Json(pet.into()))
}
