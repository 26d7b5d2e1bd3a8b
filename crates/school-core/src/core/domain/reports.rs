use crate::api::models::{
    CollectionEntryDto, CollectionReportDto, DashboardSummaryDto, FinanceDashboardDto,
    MethodTotalDto, MonthlyTotalDto, OutstandingBalanceDto,
};
use crate::core::domain::{Payment, PaymentMethod};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_expected: f64,
    pub total_collected: f64,
    pub total_outstanding: f64,
    pub collection_rate: f64,
    pub pending_verifications: u32,
}

impl From<DashboardSummaryDto> for DashboardSummary {
    fn from(dto: DashboardSummaryDto) -> Self {
        Self {
            total_expected: dto.total_expected,
            total_collected: dto.total_collected,
            total_outstanding: dto.total_outstanding,
            collection_rate: dto.collection_rate,
            pending_verifications: dto.pending_verifications,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: f64,
    pub count: u32,
}

impl From<MethodTotalDto> for MethodTotal {
    fn from(dto: MethodTotalDto) -> Self {
        Self {
            method: PaymentMethod::from_wire(&dto.method),
            total: dto.total,
            count: dto.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

impl From<MonthlyTotalDto> for MonthlyTotal {
    fn from(dto: MonthlyTotalDto) -> Self {
        Self {
            month: dto.month,
            total: dto.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinanceDashboard {
    pub summary: DashboardSummary,
    pub collections_by_method: Vec<MethodTotal>,
    pub monthly_collections: Vec<MonthlyTotal>,
    pub recent_payments: Vec<Payment>,
}

impl From<FinanceDashboardDto> for FinanceDashboard {
    fn from(dto: FinanceDashboardDto) -> Self {
        Self {
            summary: dto.summary.into(),
            collections_by_method: dto
                .collections_by_method
                .into_iter()
                .map(Into::into)
                .collect(),
            monthly_collections: dto.monthly_collections.into_iter().map(Into::into).collect(),
            recent_payments: dto.recent_payments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub count: u32,
}

impl From<CollectionEntryDto> for CollectionEntry {
    fn from(dto: CollectionEntryDto) -> Self {
        Self {
            date: dto.date,
            amount: dto.amount,
            count: dto.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionReport {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total_collected: f64,
    pub payment_count: u32,
    pub entries: Vec<CollectionEntry>,
}

impl From<CollectionReportDto> for CollectionReport {
    fn from(dto: CollectionReportDto) -> Self {
        Self {
            from: dto.from,
            to: dto.to,
            total_collected: dto.total_collected,
            payment_count: dto.payment_count,
            entries: dto.entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutstandingBalance {
    pub student_id: i64,
    pub student_name: String,
    pub class_name: Option<String>,
    pub balance: f64,
    pub last_payment_date: Option<NaiveDate>,
}

impl From<OutstandingBalanceDto> for OutstandingBalance {
    fn from(dto: OutstandingBalanceDto) -> Self {
        Self {
            student_id: dto.student_id,
            student_name: dto.student_name,
            class_name: dto.class_name,
            balance: dto.balance,
            last_payment_date: dto.last_payment_date,
        }
    }
}
