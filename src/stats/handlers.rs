use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState, stats::repo};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_products: i64,
}

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let total_users = repo::count_users(&state.db).await?;
    let total_products = repo::count_products(&state.db).await?;
    Ok(Json(StatsResponse {
        total_users,
        total_products,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_camel_case() {
        let json = serde_json::to_string(&StatsResponse {
            total_users: 3,
            total_products: 12,
        })
        .unwrap();
        assert_eq!(json, r#"{"totalUsers":3,"totalProducts":12}"#);
    }
}
