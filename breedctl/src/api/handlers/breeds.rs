use crate::{
    AppState,
    api::models::breeds::{BreedCreate, BreedResponse, BreedUpdate, ListBreedsQuery},
    db::{
        handlers::{Breeds, Repository},
        models::breeds::{BreedCreateDBRequest, BreedUpdateDBRequest},
    },
    errors::{Error, Result},
    types::BreedId,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

fn not_found(id: BreedId) -> Error {
    Error::NotFound {
        resource: "Breed".to_string(),
        id: id.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/breeds",
    tag = "breeds",
    summary = "List breeds",
    description = "Breeds ordered by name. Weight bounds match when either the male or the female average satisfies them.",
    params(ListBreedsQuery),
    responses(
        (status = 200, description = "Matching breeds", body = Vec<BreedResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_breeds(
    State(state): State<AppState>,
    Query(query): Query<ListBreedsQuery>,
) -> Result<Json<Vec<BreedResponse>>> {
    let repo = Breeds::new(state.store.as_ref());
    let breeds = repo.list(&query.to_filter()).await?;
    Ok(Json(breeds.into_iter().map(BreedResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/breeds/{id}",
    tag = "breeds",
    summary = "Get breed",
    responses(
        (status = 200, description = "Breed details", body = BreedResponse),
        (status = 404, description = "Breed not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Breed ID")
    )
)]
#[tracing::instrument(skip_all, fields(breed_id = id))]
pub async fn get_breed(State(state): State<AppState>, Path(id): Path<BreedId>) -> Result<Json<BreedResponse>> {
    let repo = Breeds::new(state.store.as_ref());
    let breed = repo.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(BreedResponse::from(breed)))
}

#[utoipa::path(
    post,
    path = "/breeds",
    tag = "breeds",
    summary = "Create breed",
    request_body = BreedCreate,
    responses(
        (status = 201, description = "Breed created", body = BreedResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_breed(
    State(state): State<AppState>,
    Json(create): Json<BreedCreate>,
) -> Result<(StatusCode, Json<BreedResponse>)> {
    let repo = Breeds::new(state.store.as_ref());
    let breed = repo.create(&BreedCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(BreedResponse::from(breed))))
}

#[utoipa::path(
    put,
    path = "/breeds/{id}",
    tag = "breeds",
    summary = "Update breed",
    description = "Only fields with a non-empty, positive value are changed. Returns the full updated breed.",
    request_body = BreedUpdate,
    responses(
        (status = 200, description = "Breed updated", body = BreedResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Breed not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Breed ID")
    )
)]
#[tracing::instrument(skip_all, fields(breed_id = id))]
pub async fn update_breed(
    State(state): State<AppState>,
    Path(id): Path<BreedId>,
    Json(update): Json<BreedUpdate>,
) -> Result<Json<BreedResponse>> {
    let repo = Breeds::new(state.store.as_ref());
    if repo.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let breed = repo.update(id, &BreedUpdateDBRequest::from(update)).await?;
    Ok(Json(BreedResponse::from(breed)))
}

#[utoipa::path(
    delete,
    path = "/breeds/{id}",
    tag = "breeds",
    summary = "Delete breed",
    responses(
        (status = 204, description = "Breed deleted"),
        (status = 404, description = "Breed not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Breed ID")
    )
)]
#[tracing::instrument(skip_all, fields(breed_id = id))]
pub async fn delete_breed(State(state): State<AppState>, Path(id): Path<BreedId>) -> Result<StatusCode> {
    let repo = Breeds::new(state.store.as_ref());
    if repo.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
