//! OpenAPI documentation for the breed catalogue API.
//!
//! The document is served as JSON at `/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Breed Catalogue API",
        description = "Query, maintain and bulk import the pet breed catalogue."
    ),
    paths(
        api::handlers::breeds::list_breeds,
        api::handlers::breeds::get_breed,
        api::handlers::breeds::create_breed,
        api::handlers::breeds::update_breed,
        api::handlers::breeds::delete_breed,
        api::handlers::import::import_breeds,
        api::handlers::health::health,
    ),
    components(
        schemas(
            api::models::breeds::BreedResponse,
            api::models::breeds::BreedCreate,
            api::models::breeds::BreedUpdate,
            api::models::breeds::ImportResponse,
        )
    ),
    tags(
        (name = "breeds", description = "Breed lookup and maintenance"),
        (name = "import", description = "Transactional CSV bulk import"),
        (name = "health", description = "Service liveness"),
    )
)]
pub struct ApiDoc;
