use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use shapes_core::{FactStore, FormulaService};
use tower_http::trace::TraceLayer;

use crate::page;

#[derive(Debug, Deserialize)]
struct ConceptForm {
    concept: String,
}

pub fn router(service: Arc<FormulaService>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/shapes", get(shapes_form).post(shapes_submit))
        .route("/debug_facts", get(debug_facts))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn home() -> Html<String> {
    Html(page::home())
}

async fn shapes_form() -> Html<String> {
    Html(page::shapes(None))
}

async fn shapes_submit(
    State(service): State<Arc<FormulaService>>,
    Form(form): Form<ConceptForm>,
) -> Html<String> {
    let answer = service.answer(&form.concept).await;
    Html(page::shapes(Some((&answer.concept, &answer.response))))
}

async fn debug_facts(State(service): State<Arc<FormulaService>>) -> Json<serde_json::Value> {
    Json(facts_json(service.facts()))
}

/// Every record with its labels and raw formulas; absent formulas are `null`.
pub fn facts_json(facts: &FactStore) -> serde_json::Value {
    let records: Vec<serde_json::Value> = facts
        .iter()
        .map(|r| {
            serde_json::json!({
                "labels": r.labels,
                "area_formula": r.area_formula,
                "perimeter_formula": r.perimeter_formula,
            })
        })
        .collect();
    serde_json::json!({ "shape_records": records })
}

pub async fn serve(service: Arc<FormulaService>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_core::{ShapeRecord, SynonymTable};

    fn service() -> Arc<FormulaService> {
        let facts = FactStore::new(vec![
            ShapeRecord::new(&["circle"])
                .with_area("πr²")
                .with_perimeter("2πr"),
            ShapeRecord::new(&["square"]).with_area("s²"),
        ]);
        Arc::new(FormulaService::new(facts, SynonymTable::default()))
    }

    async fn spawn() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(service())).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_home_links_to_form() {
        let base = spawn().await;
        let body = reqwest::get(&base).await.unwrap().text().await.unwrap();
        assert!(body.contains("href=\"/shapes\""));
    }

    #[tokio::test]
    async fn test_get_shapes_shows_empty_form() {
        let base = spawn().await;
        let resp = reqwest::get(format!("{base}/shapes")).await.unwrap();
        assert!(resp.status().is_success());
        let body = resp.text().await.unwrap();
        assert!(body.contains("<form"));
        assert!(!body.contains("Area Formula"));
    }

    #[tokio::test]
    async fn test_post_shapes_renders_line_break() {
        let base = spawn().await;
        let body = reqwest::Client::new()
            .post(format!("{base}/shapes"))
            .form(&[("concept", "Area of Circle")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("<h2>Area of Circle</h2>"));
        assert!(body.contains("Area Formula: πr²<br>Perimeter/Circumference Formula: 2πr"));
    }

    #[tokio::test]
    async fn test_post_unknown_concept() {
        let base = spawn().await;
        let body = reqwest::Client::new()
            .post(format!("{base}/shapes"))
            .form(&[("concept", "hexagon")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("The concept you entered was not found. Please try again."));
    }

    #[tokio::test]
    async fn test_post_without_concept_is_rejected() {
        let base = spawn().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/shapes"))
            .form(&[("other", "x")])
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn test_debug_facts_lists_records() {
        let base = spawn().await;
        let json: serde_json::Value = reqwest::get(format!("{base}/debug_facts"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let records = json["shape_records"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["labels"][0], "circle");
        assert_eq!(records[1]["perimeter_formula"], serde_json::Value::Null);
    }

    #[test]
    fn test_facts_json_shape() {
        let v = facts_json(service().facts());
        assert_eq!(v["shape_records"][0]["area_formula"], "πr²");
    }
}
