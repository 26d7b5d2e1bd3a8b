use crate::api::models::{
    FeeStatementDto, FeeStructureDto, PaymentDto, ReceiptDto, TransactionDto,
};
use chrono::{DateTime, NaiveDate, Utc};

crate::wire_enum! {
    pub enum TransactionKind {
        Charge => "charge",
        Payment => "payment",
        Adjustment => "adjustment",
    }
}

crate::wire_enum! {
    pub enum PaymentMethod {
        Cash => "cash",
        BankTransfer => "bank_transfer",
        BankDeposit => "bank_deposit",
        MobileMoney => "mobile_money",
        Cheque => "cheque",
        Card => "card",
    }
}

crate::wire_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Verified => "verified",
        Rejected => "rejected",
    }
}

crate::wire_enum! {
    /// Outcome chosen by the bursar when reviewing a submitted payment
    pub enum VerificationDecision {
        Verified => "verified",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub balance: Option<f64>,
    pub reference: Option<String>,
}

impl From<TransactionDto> for Transaction {
    fn from(dto: TransactionDto) -> Self {
        Self {
            id: dto.id,
            date: dto.date,
            description: dto.description,
            kind: TransactionKind::from_wire(&dto.kind),
            amount: dto.amount,
            balance: dto.balance,
            reference: dto.reference,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeStatement {
    pub student_id: i64,
    pub student_name: Option<String>,
    pub admission_number: Option<String>,
    pub total_fees: f64,
    pub total_paid: f64,
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

impl FeeStatement {
    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }
}

impl From<FeeStatementDto> for FeeStatement {
    fn from(dto: FeeStatementDto) -> Self {
        Self {
            student_id: dto.student_id,
            student_name: dto.student_name,
            admission_number: dto.admission_number,
            total_fees: dto.total_fees,
            total_paid: dto.total_paid,
            balance: dto.balance,
            transactions: dto.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference_number: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub bank_slip_url: Option<String>,
    pub verified_by: Option<i64>,
    pub verified_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Self {
            id: dto.id,
            student_id: dto.student_id,
            student_name: dto.student_name,
            amount: dto.amount,
            payment_method: PaymentMethod::from_wire(&dto.payment_method),
            status: PaymentStatus::from_wire(&dto.status),
            reference_number: dto.reference_number,
            payment_date: dto.payment_date,
            bank_slip_url: dto.bank_slip_url,
            verified_by: dto.verified_by,
            verified_at: dto.verified_at,
            notes: dto.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeStructure {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub class_id: Option<i64>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<FeeStructureDto> for FeeStructure {
    fn from(dto: FeeStructureDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            amount: dto.amount,
            class_id: dto.class_id,
            term: dto.term,
            academic_year: dto.academic_year,
            due_date: dto.due_date,
            description: dto.description,
            is_active: dto.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: i64,
    pub receipt_number: String,
    pub payment_id: i64,
    pub student_name: Option<String>,
    pub amount: f64,
    pub issued_at: Option<DateTime<Utc>>,
    pub pdf_url: Option<String>,
}

impl From<ReceiptDto> for Receipt {
    fn from(dto: ReceiptDto) -> Self {
        Self {
            id: dto.id,
            receipt_number: dto.receipt_number,
            payment_id: dto.payment_id,
            student_name: dto.student_name,
            amount: dto.amount,
            issued_at: dto.issued_at,
            pdf_url: dto.pdf_url,
        }
    }
}

/// A receipt PDF written to local storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedReceipt {
    pub receipt_id: i64,
    pub path: std::path::PathBuf,
    pub content_type: &'static str,
    pub size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_mapping_normalizes_enums() {
        let dto: PaymentDto = serde_json::from_value(serde_json::json!({
            "id": 10,
            "student_id": 2,
            "amount": 5000,
            "payment_method": "Mobile_Money",
            "status": "PENDING"
        }))
        .unwrap();

        let payment = Payment::from(dto);
        assert_eq!(payment.payment_method, PaymentMethod::MobileMoney);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount, 5000.0);
    }

    #[test]
    fn test_fee_statement_mapping_keeps_transaction_order() {
        let dto: FeeStatementDto = serde_json::from_value(serde_json::json!({
            "student_id": 1,
            "total_fees": 20000,
            "total_paid": 5000,
            "balance": 15000,
            "transactions": [
                {"id": 1, "date": "2024-01-05", "description": "Term 1", "type": "charge", "amount": 20000},
                {"id": 2, "date": "2024-01-20", "description": "M-Pesa", "type": "Payment", "amount": 5000}
            ]
        }))
        .unwrap();

        let statement = FeeStatement::from(dto);
        assert!(statement.has_transactions());
        let kinds: Vec<_> = statement.transactions.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(kinds, vec![TransactionKind::Charge, TransactionKind::Payment]);
    }
}
