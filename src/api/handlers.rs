use crate::api::{ApiError, ApiResult, AppState};
use crate::catalog::{Catalog, build_precomputed_catalog};
use crate::matcher::match_supplier_room;
use crate::model::{CatalogError, RoomMatch};
use crate::storage::CatalogStore;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub hotel_id: String,
    pub supplier_room_name: String,
    pub matches: Vec<RoomMatch>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn match_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let (Some(hotel_id), Some(room_name)) = (required(request.hotel_id), required(request.room_name)) else {
        return Err(ApiError::BadRequest("hotel_id and room_name are required".into()));
    };

    let catalog = state.snapshot();
    let mut matches = match_supplier_room(&catalog, &hotel_id, &room_name);
    if let Some(top_k) = state.config.matching.top_k {
        matches.truncate(top_k);
    }

    info!("Matched {:?} for {}: {} candidates", room_name, hotel_id, matches.len());

    Ok(Json(MatchResponse {
        hotel_id,
        supplier_room_name: room_name,
        matches,
    }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let catalog = state.snapshot();

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "rooms": catalog.len(),
        "hotels": catalog.hotel_count(),
        "loaded_at": state.loaded_at().to_rfc3339()
    }))
}

/// Rebuilds the precomputed catalog from the raw CSV and swaps it in.
pub async fn reload_catalog(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let config = state.config.clone();
    info!("Catalog reload requested");

    let catalog = tokio::task::spawn_blocking(move || -> Result<Catalog, CatalogError> {
        let mut store = CatalogStore::open(&config.data.precomputed_path)?;
        build_precomputed_catalog(&config.data.raw_path, &mut store)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("reload task failed: {}", e)))??;

    let rooms = catalog.len();
    let hotels = catalog.hotel_count();
    state.replace_catalog(catalog);
    info!("Catalog swapped: {} rooms, {} hotels", rooms, hotels);

    Ok(Json(json!({
        "status": "reloaded",
        "rooms": rooms,
        "hotels": hotels,
        "loaded_at": state.loaded_at().to_rfc3339()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use crate::catalog::build_catalog;
    use crate::config::parse_config;
    use crate::model::RawRoom;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn config_json(raw_path: &str, db_path: &str, top_k: Option<usize>) -> String {
        json!({
            "data": { "raw_path": raw_path, "precomputed_path": db_path },
            "matching": { "top_k": top_k },
            "api": { "host": "127.0.0.1", "port": 0 }
        })
        .to_string()
    }

    fn state_with(rows: &[(&str, &str)], top_k: Option<usize>) -> Arc<AppState> {
        let raw: Vec<RawRoom> = rows
            .iter()
            .map(|(h, n)| RawRoom {
                hotel_id: h.to_string(),
                room_name: n.to_string(),
            })
            .collect();
        let config = parse_config(&config_json("unused.csv", "unused.db", top_k)).unwrap();
        Arc::new(AppState::new(Arc::new(config), build_catalog(&raw)))
    }

    async fn post_json(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn match_returns_ranked_plain_values() {
        let state = state_with(
            &[
                ("lp42", "Twin Room with Balcony"),
                ("lp42", "Double Room"),
                ("lp7", "Twin Room with Balcony"),
            ],
            None,
        );

        let (status, body) = post_json(
            state,
            "/match",
            json!({ "hotel_id": "lp42", "room_name": "Twin Room Balcony" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: MatchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.hotel_id, "lp42");
        assert_eq!(response.supplier_room_name, "Twin Room Balcony");
        assert_eq!(response.matches[0].room_name, "Twin Room with Balcony");
        assert_eq!(response.matches[0].similarity, 100);
        assert_eq!(response.matches.len(), 2);
    }

    #[tokio::test]
    async fn top_k_truncates() {
        let state = state_with(&[("lp1", "Suite"), ("lp1", "Junior Suite"), ("lp1", "Suite Deluxe")], Some(1));
        let (status, body) = post_json(state, "/match", json!({ "hotel_id": "lp1", "room_name": "Suite" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"].as_array().unwrap().len(), 1);
        assert_eq!(body["matches"][0]["room_name"], "Suite");
    }

    #[tokio::test]
    async fn unknown_hotel_is_empty_not_error() {
        let state = state_with(&[("lpAAAA", "Suite")], None);
        let (status, body) = post_json(state, "/match", json!({ "hotel_id": "lpBBBB", "room_name": "Suite" })).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_bad_request() {
        let state = state_with(&[("lp1", "Suite")], None);

        let (status, body) = post_json(state.clone(), "/match", json!({ "hotel_id": "lp1" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "hotel_id and room_name are required");

        let (status, _) = post_json(state, "/match", json!({ "hotel_id": "", "room_name": "Suite" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_catalog_size() {
        let state = state_with(&[("lp1", "Suite"), ("lp2", "Loft")], None);
        let response = router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["rooms"], 2);
        assert_eq!(body["hotels"], 2);
    }

    #[tokio::test]
    async fn reload_swaps_in_rebuilt_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("rooms.csv");
        let db_path = dir.path().join("catalog.db");
        std::fs::write(&raw_path, "lp_id,room_name\nlp5,Garden Suite\nlp5,Loft\nlp6,Room\n").unwrap();

        let config = parse_config(&config_json(
            raw_path.to_str().unwrap(),
            db_path.to_str().unwrap(),
            None,
        ))
        .unwrap();
        let state = Arc::new(AppState::new(Arc::new(config), Catalog::default()));
        let before = state.snapshot();

        let (status, body) = post_json(state.clone(), "/catalog/reload", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rooms"], 3);

        assert!(before.is_empty());
        assert_eq!(state.snapshot().rooms_for_hotel("lp5").len(), 2);
        assert_eq!(CatalogStore::open(&db_path).unwrap().load_catalog().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn reload_failure_keeps_current_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("rooms.csv");
        let db_path = dir.path().join("catalog.db");
        std::fs::write(&raw_path, "hotel,room_name\nlp5,Suite\n").unwrap();

        let config = parse_config(&config_json(
            raw_path.to_str().unwrap(),
            db_path.to_str().unwrap(),
            None,
        ))
        .unwrap();
        let raw = [RawRoom {
            hotel_id: "lp1".into(),
            room_name: "Suite".into(),
        }];
        let state = Arc::new(AppState::new(Arc::new(config), build_catalog(&raw)));

        let (status, body) = post_json(state.clone(), "/catalog/reload", json!({})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "catalog is missing required column `lp_id`");
        assert_eq!(state.snapshot().len(), 1);
    }
}
