//! Finance report payloads.
//!
//! Each report section is a named struct with per-field defaults, so a
//! missing or mistyped value degrades to zero/empty instead of failing the
//! whole report.

use super::finance::PaymentDto;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FinanceDashboardDto {
    #[serde(default)]
    pub summary: DashboardSummaryDto,
    #[serde(default)]
    pub collections_by_method: Vec<MethodTotalDto>,
    #[serde(default)]
    pub monthly_collections: Vec<MonthlyTotalDto>,
    #[serde(default)]
    pub recent_payments: Vec<PaymentDto>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DashboardSummaryDto {
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_expected: f64,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_collected: f64,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_outstanding: f64,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub collection_rate: f64,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub pending_verifications: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodTotalDto {
    pub method: String,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total: f64,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyTotalDto {
    pub month: String,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CollectionReportDto {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_collected: f64,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub payment_count: u32,
    #[serde(default)]
    pub entries: Vec<CollectionEntryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntryDto {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutstandingBalanceDto {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub balance: f64,
    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,
}
