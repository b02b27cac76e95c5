use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{CodeEntry, RedeemRequest, RedeemResponse};
use std::sync::Arc;

use crate::AppState;

#[derive(Deserialize)]
pub struct ListCodesParams {
    pub game: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListCodesParams>,
) -> Json<Vec<CodeEntry>> {
    let codes = state
        .catalog
        .active(params.game.as_deref())
        .into_iter()
        .map(CodeEntry::from)
        .collect();
    Json(codes)
}

/// Reports whether the code exists. The catalog is left untouched.
pub async fn redeem(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RedeemRequest>,
) -> Json<RedeemResponse> {
    if state.catalog.contains(&payload.code) {
        tracing::info!("Redeemed {} for {}", payload.code, payload.game);
        return Json(RedeemResponse {
            success: true,
            message: format!(
                "Code {} redeemed successfully for {}!",
                payload.code, payload.game
            ),
        });
    }

    tracing::debug!("Unknown code {}", payload.code);
    Json(RedeemResponse {
        success: false,
        message: format!("Code {} not found or expired", payload.code),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{get, post_json, test_app};

    #[tokio::test]
    async fn lists_seed_codes_in_order() {
        let (status, body) = get(test_app(), "/api/codes").await;
        assert_eq!(status, StatusCode::OK);

        let codes: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(codes, ["GENSHINGIFT", "STARRAILGIFT", "IMPACTCODE123"]);
        assert!(body[0].get("active").is_none());
        assert_eq!(body[0]["expires"], "2025-12-31");
    }

    #[tokio::test]
    async fn filters_by_game_case_insensitively() {
        let (status, body) = get(test_app(), "/api/codes?game=honkai:%20star%20rail").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["code"], "STARRAILGIFT");
    }

    #[tokio::test]
    async fn blank_game_query_is_no_filter() {
        let (status, body) = get(test_app(), "/api/codes?game=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn redeems_known_code() {
        let (status, body) = post_json(
            test_app(),
            "/api/redeem",
            json!({"code": "GENSHINGIFT", "game": "Genshin Impact"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Code GENSHINGIFT redeemed successfully for Genshin Impact!"
            })
        );
    }

    #[tokio::test]
    async fn unknown_code_is_reported_not_rejected() {
        let (status, body) = post_json(
            test_app(),
            "/api/redeem",
            json!({"code": "NOPE", "game": "Genshin Impact"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Code NOPE not found or expired");
    }

    #[tokio::test]
    async fn redeem_does_not_change_the_list() {
        let app = test_app();
        post_json(
            app.clone(),
            "/api/redeem",
            json!({"code": "GENSHINGIFT", "game": "Genshin Impact"}),
        )
        .await;

        let (_, body) = get(app, "/api/codes").await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }
}
