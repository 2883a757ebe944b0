//! WASM bindings for overlap-engine.
//!
//! Exposes month aggregation, day buckets, and group overlap to a browser
//! front end via `wasm-bindgen`. Inputs and outputs are JSON strings. Every
//! aggregation call takes a JSON array of v1 availability exports, which are
//! validated here before they reach the engine.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_engine_wasm.wasm
//! ```

use overlap_engine::{AvailabilityExport, Interval, MonthKey, PersonAvailabilityRecord, Roster};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupOverlapDto<'a> {
    per_person: &'a [overlap_engine::aggregate::PersonIntervals],
    everyone: &'a [Interval],
    best_window: Option<Interval>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationDto {
    user_id: String,
    full_name: String,
    month: String,
    days: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Parse a JSON array of export documents into records.
///
/// Each element is validated like a standalone import. Later documents for
/// the same person replace earlier ones.
fn parse_exports_json(json: &str) -> Result<Vec<PersonAvailabilityRecord>, JsValue> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid exports JSON: {}", e)))?;

    let mut roster = Roster::new();
    for (i, value) in raw.into_iter().enumerate() {
        let doc: AvailabilityExport = serde_json::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Export #{}: {}", i + 1, e)))?;
        doc.validate()
            .map_err(|e| JsValue::from_str(&format!("Export #{}: {}", i + 1, e)))?;
        roster.import_export(doc);
    }
    Ok(roster.all().cloned().collect())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Count people free on each mentioned day of `month` (`YYYY-MM`).
///
/// Returns `{month, total, byDay: {dayKey: {dayKey, freeCount, total}}}`.
#[wasm_bindgen(js_name = "aggregateMonth")]
pub fn aggregate_month(
    exports_json: &str,
    month: &str,
    evenings_only: bool,
) -> Result<String, JsValue> {
    let records = parse_exports_json(exports_json)?;
    let month: MonthKey = month.parse().map_err(js_err)?;
    to_json(&overlap_engine::aggregate_month(&records, &month, evenings_only))
}

/// Free-counts per `bucket_minutes`-wide bucket for `day` (`YYYY-MM-DD`).
///
/// Returns an array of `{startMins, endMins, freeCount}`.
#[wasm_bindgen(js_name = "computeDayBuckets")]
pub fn compute_day_buckets(
    exports_json: &str,
    day: &str,
    evenings_only: bool,
    bucket_minutes: u16,
) -> Result<String, JsValue> {
    let records = parse_exports_json(exports_json)?;
    let day: overlap_engine::DayKey = day.parse().map_err(js_err)?;
    let buckets = overlap_engine::compute_day_buckets(
        &records,
        &day.to_string(),
        evenings_only,
        bucket_minutes,
    )
    .map_err(js_err)?;
    to_json(&buckets)
}

/// Each person's free intervals for `day`, the shared intersection, and the
/// longest shared window.
#[wasm_bindgen(js_name = "groupOverlap")]
pub fn group_overlap(exports_json: &str, day: &str, evenings_only: bool) -> Result<String, JsValue> {
    let records = parse_exports_json(exports_json)?;
    let day: overlap_engine::DayKey = day.parse().map_err(js_err)?;
    let overlap = overlap_engine::group_overlap(&records, &day.to_string(), evenings_only);
    to_json(&GroupOverlapDto {
        per_person: &overlap.per_person,
        everyone: &overlap.everyone,
        best_window: overlap.best_window(),
    })
}

/// Validate a single export document before the UI stores it.
///
/// Returns a short summary `{userId, fullName, month, days}` or an error string.
#[wasm_bindgen(js_name = "validateExport")]
pub fn validate_export(json: &str) -> Result<String, JsValue> {
    let doc = AvailabilityExport::from_json(json).map_err(js_err)?;
    to_json(&ValidationDto {
        month: doc.month.to_string(),
        days: doc.overrides_by_day.len(),
        user_id: doc.user.id,
        full_name: doc.user.full_name,
    })
}
