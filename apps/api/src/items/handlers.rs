//! Axum route handlers for the Items API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::items::{
    BuildResult, Diagnostics, Item, ItemError, ItemRecord, Requirement, ScoreBreakdown,
    SkillsDict,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Largest item `handle_build` accepts. The search enumerates every line subset, so work
/// doubles with each line.
pub const MAX_BUILD_LINES: usize = 16;

/// `item` is a persisted item record, kept raw so its type tag is checked first.
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    pub item: Value,
    pub requirement: Requirement,
}

#[derive(Debug, Serialize)]
pub struct BuildResponse {
    /// One entry per line count, starting at zero.
    pub results: Vec<BuildResult<String>>,
    pub diagnostics: Diagnostics,
    /// The item with any newly generated line scores, ready to store back.
    pub item: ItemRecord,
}

#[derive(Debug, Deserialize)]
pub struct ScoresRequest {
    pub item: Value,
    #[serde(default)]
    pub selection: Vec<usize>,
    pub requirement: Requirement,
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub scores: ScoreBreakdown,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub item: Value,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: SkillsDict,
    pub item: ItemRecord,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/items/build
///
/// Builds the best variant of the item for every line count. The exhaustive search is
/// CPU-bound, so it runs on the blocking pool.
pub async fn handle_build(
    State(state): State<AppState>,
    Json(request): Json<BuildRequest>,
) -> Result<Json<BuildResponse>, AppError> {
    let BuildRequest { item, requirement } = request;
    let item = Item::from_value(item)?;
    if item.lines.len() > MAX_BUILD_LINES {
        return Err(AppError::Validation(format!(
            "item has {} lines, build accepts at most {MAX_BUILD_LINES}",
            item.lines.len()
        )));
    }
    let renderer = state.renderer.clone();
    let scorer = state.scorer.clone();

    let (results, diagnostics, item) = tokio::task::spawn_blocking(move || {
        let mut diagnostics = Diagnostics::new();
        let results = item.build(
            renderer.as_ref(),
            scorer.as_ref(),
            &requirement,
            &mut diagnostics,
        )?;
        Ok::<_, ItemError>((results, diagnostics, item))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in build: {e}")))??;

    info!(
        lines = item.lines.len(),
        variants = results.len(),
        warnings = diagnostics.len(),
        "Item built"
    );

    Ok(Json(BuildResponse {
        results,
        diagnostics,
        item: item.to_record(),
    }))
}

/// POST /api/v1/items/scores
///
/// Per-category score breakdown for a caller-chosen selection. No search.
pub async fn handle_scores(
    State(state): State<AppState>,
    Json(request): Json<ScoresRequest>,
) -> Result<Json<ScoresResponse>, AppError> {
    let item = Item::from_value(request.item)?;
    let mut diagnostics = Diagnostics::new();
    let scores = item.calc_scores(
        &request.selection,
        state.scorer.as_ref(),
        &request.requirement,
        &mut diagnostics,
    )?;

    Ok(Json(ScoresResponse {
        scores,
        diagnostics,
    }))
}

/// POST /api/v1/items/skills
///
/// Skills mentioned across the item's lines, per category.
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let item = Item::from_value(request.item)?;
    let skills = item.get_skills_dict(state.scorer.as_ref());

    Ok(Json(SkillsResponse {
        skills,
        item: item.to_record(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::MAX_BUILD_LINES;
    use crate::config::Config;
    use crate::render::LatexRenderer;
    use crate::routes::build_router;
    use crate::skill_scoring::{KeywordLineScorer, SkillVocabulary};
    use crate::state::AppState;

    fn test_state() -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        AppState {
            renderer: Arc::new(LatexRenderer::new(config.page_config())),
            scorer: Arc::new(KeywordLineScorer::new(SkillVocabulary::builtin())),
            config,
        }
    }

    async fn post(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = build_router(test_state())
            .oneshot(
                Request::post(uri)
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

    fn item_json() -> serde_json::Value {
        json!({
            "titles": ["Acme", "2021 -- 2024", "Backend Engineer", "Remote"],
            "lines": [
                { "content": "Rewrote ingestion in Rust", "cate_score": { "technical": { "rust": 5.0 } } },
                { "content": "Maintained Python tooling", "cate_score": { "technical": { "python": 3.0 } } },
                { "content": "Led a team of four", "cate_score": { "soft": { "leadership": 4.0 } } }
            ],
            "aux_info": { "type": "items", "style": "" }
        })
    }

    #[tokio::test]
    async fn test_build_returns_variant_per_line_count() {
        let (status, body) = post(
            "/api/v1/items/build",
            json!({
                "item": item_json(),
                "requirement": {
                    "technical": { "rust": 1.0, "python": 1.0 },
                    "soft": { "leadership": 1.0 },
                    "relevant": {}
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0]["score"], json!(0.0));
        assert_eq!(results[0]["selection"], json!([]));
        assert_eq!(results[2]["selection"], json!([0, 2]));
        assert_eq!(results[2]["score"], json!(9.0));
        assert!(results[3]["artifact"]
            .as_str()
            .unwrap()
            .contains("\\resumeItem{Led a team of four}"));
        assert_eq!(body["item"]["aux_info"]["type"], json!("items"));
    }

    #[tokio::test]
    async fn test_build_rejects_wrong_record_type() {
        let mut item = item_json();
        item["aux_info"]["type"] = json!("resume");
        let (status, body) = post(
            "/api/v1/items/build",
            json!({ "item": item, "requirement": { "technical": { "rust": 1.0 } } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_build_rejects_items_over_the_line_cap() {
        let mut item = item_json();
        item["lines"] = (0..=MAX_BUILD_LINES)
            .map(|i| json!({ "content": format!("Shipped feature {i}") }))
            .collect();
        let (status, body) = post(
            "/api/v1/items/build",
            json!({ "item": item, "requirement": { "technical": { "rust": 1.0 } } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_build_paragraph_is_not_implemented() {
        let (status, _) = post(
            "/api/v1/items/build",
            json!({
                "item": { "aux_info": { "type": "items", "style": "p" }, "paragraph": "Summary" },
                "requirement": { "technical": { "rust": 1.0 } }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_scores_reports_breakdown_and_neglected_skills() {
        let (status, body) = post(
            "/api/v1/items/scores",
            json!({
                "item": item_json(),
                "selection": [0, 1],
                "requirement": { "technical": { "rust": 2.0, "go": 1.0 } }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scores"]["technical"]["scores"]["rust"], json!(5.0));
        assert_eq!(body["scores"]["technical"]["scores"]["go"], json!(0.0));
        assert_eq!(body["scores"]["technical"]["bias"], json!(1.0));
        assert_eq!(
            body["diagnostics"],
            json!([{
                "kind": "skill_not_in_requirement",
                "line": 1,
                "category": "technical",
                "skill": "python"
            }])
        );
    }

    #[tokio::test]
    async fn test_skills_generates_missing_scores() {
        let (status, body) = post(
            "/api/v1/items/skills",
            json!({
                "item": {
                    "titles": ["A", "B", "C", "D"],
                    "lines": [{ "content": "Led a migration to Postgres that reduced costs" }],
                    "aux_info": { "type": "items", "style": "" }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"]["technical"], json!(["sql"]));
        assert_eq!(body["skills"]["soft"], json!(["leadership"]));
        assert_eq!(body["skills"]["relevance"], json!(["impact"]));
        assert!(body["item"]["lines"][0]["cate_score"]["technical"]["sql"].is_number());
    }
}
