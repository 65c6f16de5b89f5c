use crate::{
    AppState,
    api::models::breeds::ImportResponse,
    db::handlers::Breeds,
    errors::Result,
    import::{read_breeds, read_breeds_file},
};
use axum::{Json, extract::State};
use tracing::info;

const REQUEST_BODY_SOURCE: &str = "request body";

#[utoipa::path(
    post,
    path = "/import-breeds",
    tag = "import",
    summary = "Bulk import breeds",
    description = "Upserts every record from a CSV document in one transaction. Send the CSV as the \
                   request body, or send an empty body to import the server's configured file. \
                   Either every record is applied or none is.",
    request_body(content = String, content_type = "text/csv", description = "CSV with a header row"),
    responses(
        (status = 200, description = "All records imported", body = ImportResponse),
        (status = 400, description = "Malformed CSV or a record rejected by the catalogue"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn import_breeds(State(state): State<AppState>, body: String) -> Result<Json<ImportResponse>> {
    let (records, source) = if body.trim().is_empty() {
        let path = &state.config.import.csv_path;
        (read_breeds_file(path).await?, path.display().to_string())
    } else {
        (read_breeds(&body)?, REQUEST_BODY_SOURCE.to_string())
    };
    info!(records = records.len(), source = %source, "Importing breeds");

    let repo = Breeds::new(state.store.as_ref());
    let summary = repo.import(&records).await?;

    Ok(Json(ImportResponse {
        imported: summary.imported,
        source,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::models::breeds::{BreedResponse, ImportResponse};
    use crate::db::store::in_memory::InMemoryBreedStore;
    use crate::test_utils::{create_test_config, create_test_server, create_test_server_with_config};
    use axum::http::StatusCode;
    use std::io::Write;

    const HEADER: &str = "id,species,pet_size,name,average_male_adult_weight,average_female_adult_weight";

    #[test_log::test(tokio::test)]
    async fn test_import_from_body() {
        let server = create_test_server(InMemoryBreedStore::new());
        let csv = format!("{HEADER}\n1,dog,large,Collie,27,22\n2,cat,small,Siamese,5,4\n");

        let response = server.post("/import-breeds").text(csv.clone()).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<ImportResponse>(),
            ImportResponse {
                imported: 2,
                source: "request body".to_string(),
            }
        );

        // Re-importing is idempotent
        server.post("/import-breeds").text(csv).await.assert_status_ok();
        let listed: Vec<BreedResponse> = server.get("/breeds").await.json();
        assert_eq!(listed.len(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn test_import_from_configured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "5,dog,small,Chihuahua,3,2").unwrap();

        let mut config = create_test_config();
        config.import.csv_path = file.path().to_path_buf();
        let server = create_test_server_with_config(InMemoryBreedStore::new(), config);

        let response = server.post("/import-breeds").await;
        response.assert_status_ok();
        let body: ImportResponse = response.json();
        assert_eq!(body.imported, 1);
        assert_eq!(body.source, file.path().display().to_string());

        server.get("/breeds/5").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_csv_imports_nothing() {
        let server = create_test_server(InMemoryBreedStore::new());
        let csv = format!("{HEADER}\n1,dog,large,Collie,27,22\n2,cat,small,Siamese,five,4\n");

        let response = server.post("/import-breeds").text(csv).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.text(),
            "Line 3: invalid average_male_adult_weight \"five\", expected an integer"
        );

        let listed: Vec<BreedResponse> = server.get("/breeds").await.json();
        assert!(listed.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_rejected_record_rolls_back_batch() {
        let server = create_test_server(InMemoryBreedStore::new());
        let csv = format!(
            "{HEADER}\n1,dog,large,Akita,45,35\n2,dog,small,Beagle,10,9\n3,dog,large,Collie,0,22\n4,dog,large,Dalmatian,27,24\n"
        );

        let response = server.post("/import-breeds").text(csv).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["position"], 3);
        assert_eq!(body["id"], 3);
        assert_eq!(body["name"], "Collie");

        let listed: Vec<BreedResponse> = server.get("/breeds").await.json();
        assert!(listed.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_configured_file_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = create_test_config();
        config.import.csv_path = dir.path().join("absent.csv");
        let server = create_test_server_with_config(InMemoryBreedStore::new(), config);

        let response = server.post("/import-breeds").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Failed to read import source");
    }
}
