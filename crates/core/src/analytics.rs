//! Day-bucketed aggregation over wash records.
//!
//! Everything here is pure: callers pass the full record list, the service
//! catalog, a time filter, and the reference instant. Series are zero-filled
//! across the whole selected window so charts never have gaps, and an empty
//! filtered set produces zero series rather than an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Service, ServiceCategory, WashRecord};

/// How many entries the top-services chart shows.
pub const TOP_SERVICES_LIMIT: usize = 7;

/// Time window selector for the analytics views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimeFilter {
    /// Today and the six preceding calendar days.
    #[default]
    Last7Days,
    /// Today and the 29 preceding calendar days.
    Last30Days,
    /// From the earliest record's day through today.
    AllTime,
}

impl TimeFilter {
    /// Resolve the inclusive calendar-day window `[start, end]`.
    ///
    /// Returns `None` for [`TimeFilter::AllTime`] when there are no records
    /// to anchor the start of the window.
    #[must_use]
    pub fn window(
        self,
        records: &[WashRecord],
        now: DateTime<Utc>,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let end = now.date_naive();
        let start = match self {
            Self::Last7Days => end.checked_sub_days(Days::new(6))?,
            Self::Last30Days => end.checked_sub_days(Days::new(29))?,
            Self::AllTime => records
                .iter()
                .map(|r| r.created_at.date_naive())
                .min()?,
        };
        Some((start, end))
    }
}

/// One day of the sales series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: Decimal,
}

/// One day of the car-count series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCarCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Usage count for one service across the filtered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUsage {
    /// Catalog name, or the raw service ID when the service was deleted.
    pub name: String,
    pub count: u64,
}

/// One day of per-category revenue. Every category appears every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCategoryRevenue {
    pub date: NaiveDate,
    pub revenue: Vec<CategoryTotal>,
}

/// Revenue attributed to one category on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ServiceCategory,
    pub total: Decimal,
}

/// Records whose creation day falls inside the filter window, inclusive on
/// both day boundaries.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [WashRecord],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> Vec<&'a WashRecord> {
    let Some((start, end)) = filter.window(records, now) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| {
            let day = r.created_at.date_naive();
            day >= start && day <= end
        })
        .collect()
}

/// Total `total_cost` per calendar day, zero-filled across the window.
#[must_use]
pub fn daily_sales(
    records: &[WashRecord],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> Vec<DailySales> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in filter_records(records, filter, now) {
        *by_day
            .entry(record.created_at.date_naive())
            .or_insert(Decimal::ZERO) += record.total_cost;
    }

    window_days(filter, records, now)
        .map(|date| DailySales {
            date,
            sales: by_day.get(&date).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Number of records per calendar day, zero-filled across the window.
#[must_use]
pub fn daily_car_counts(
    records: &[WashRecord],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> Vec<DailyCarCount> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in filter_records(records, filter, now) {
        *by_day.entry(record.created_at.date_naive()).or_insert(0) += 1;
    }

    window_days(filter, records, now)
        .map(|date| DailyCarCount {
            date,
            count: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Occurrence counts across `selected_services`, resolved to catalog names,
/// descending, truncated to [`TOP_SERVICES_LIMIT`].
///
/// Dangling service IDs keep their raw ID string as the display name.
#[must_use]
pub fn top_services(
    records: &[WashRecord],
    catalog: &[Service],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> Vec<ServiceUsage> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in filter_records(records, filter, now) {
        for service_id in &record.selected_services {
            *counts.entry(service_id.as_str()).or_insert(0) += 1;
        }
    }

    let mut usage: Vec<ServiceUsage> = counts
        .into_iter()
        .map(|(id, count)| {
            let name = catalog
                .iter()
                .find(|s| s.id.as_str() == id)
                .map_or_else(|| id.to_owned(), |s| s.name.clone());
            ServiceUsage { name, count }
        })
        .collect();

    // Descending by count; name breaks ties so output is deterministic.
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    usage.truncate(TOP_SERVICES_LIMIT);
    usage
}

/// Per-day revenue grouped by service category, zero-filled so that every
/// category reports a total (possibly 0) for every day in the window.
#[must_use]
pub fn revenue_by_category(
    records: &[WashRecord],
    catalog: &[Service],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> Vec<DailyCategoryRevenue> {
    let mut by_day: BTreeMap<NaiveDate, BTreeMap<&str, Decimal>> = BTreeMap::new();
    for record in filter_records(records, filter, now) {
        let day = by_day.entry(record.created_at.date_naive()).or_default();
        for service_id in &record.selected_services {
            if let Some(service) = catalog.iter().find(|s| &s.id == service_id) {
                *day.entry(service.category.as_str())
                    .or_insert(Decimal::ZERO) += service.price;
            }
        }
    }

    window_days(filter, records, now)
        .map(|date| {
            let day = by_day.get(&date);
            let revenue = ServiceCategory::ALL
                .iter()
                .map(|&category| CategoryTotal {
                    category,
                    total: day
                        .and_then(|d| d.get(category.as_str()))
                        .copied()
                        .unwrap_or(Decimal::ZERO),
                })
                .collect();
            DailyCategoryRevenue { date, revenue }
        })
        .collect()
}

/// Iterate every calendar day of the filter window in order. Empty for an
/// unanchored all-time window.
fn window_days(
    filter: TimeFilter,
    records: &[WashRecord],
    now: DateTime<Utc>,
) -> impl Iterator<Item = NaiveDate> {
    let window = filter.window(records, now);
    let mut current = window.map(|(start, _)| start);
    let end = window.map(|(_, end)| end);

    std::iter::from_fn(move || {
        let date = current?;
        if Some(date) > end {
            return None;
        }
        current = date.succ_opt();
        Some(date)
    })
}
