//! Analytics dashboard handler.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use washlytics_core::analytics::{
    self, DailyCarCount, DailyCategoryRevenue, DailySales, ServiceUsage, TimeFilter,
};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// `7d`, `30d`, or `all`. Defaults to `7d`.
    pub range: Option<String>,
}

/// Everything the dashboard charts need, computed in one pass over the
/// cached records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_revenue: Decimal,
    pub total_washes: u64,
    pub daily_sales: Vec<DailySales>,
    pub daily_car_counts: Vec<DailyCarCount>,
    pub top_services: Vec<ServiceUsage>,
    pub revenue_by_category: Vec<DailyCategoryRevenue>,
}

/// Aggregate the cached wash records over the requested window.
///
/// # Errors
///
/// Returns 400 for an unrecognized `range` value.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>> {
    let filter = parse_range(query.range.as_deref())?;

    let records = state.cache().wash_records().await;
    let catalog = state.cache().services().await;
    let now = Utc::now();

    let filtered = analytics::filter_records(&records, filter, now);
    let total_revenue = filtered.iter().map(|r| r.total_cost).sum();
    let total_washes = filtered.len() as u64;

    Ok(Json(AnalyticsResponse {
        total_revenue,
        total_washes,
        daily_sales: analytics::daily_sales(&records, filter, now),
        daily_car_counts: analytics::daily_car_counts(&records, filter, now),
        top_services: analytics::top_services(&records, &catalog, filter, now),
        revenue_by_category: analytics::revenue_by_category(&records, &catalog, filter, now),
    }))
}

fn parse_range(range: Option<&str>) -> Result<TimeFilter> {
    match range {
        None | Some("7d") => Ok(TimeFilter::Last7Days),
        Some("30d") => Ok(TimeFilter::Last30Days),
        Some("all") => Ok(TimeFilter::AllTime),
        Some(other) => Err(AppError::BadRequest(format!(
            "unknown range '{other}', expected 7d, 30d, or all"
        ))),
    }
}
