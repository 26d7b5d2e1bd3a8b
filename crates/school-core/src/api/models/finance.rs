use crate::core::domain::{PaymentMethod, VerificationDecision};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct FeeStatementDto {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub admission_number: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_fees: f64,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub total_paid: f64,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDto {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "super::lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "super::lenient_opt_f64")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Payment data sent as JSON, or as the `payment_data` part of a multipart
/// body when a bank slip is attached
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSubmission {
    pub student_id: i64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_structure_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Image of a bank deposit slip uploaded with a payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSlip {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentVerification {
    pub status: VerificationDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDto {
    pub id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(deserialize_with = "super::lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub bank_slip_url: Option<String>,
    #[serde(default)]
    pub verified_by: Option<i64>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string for `GET /finance/payments`
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PaymentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeStructureDto {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct FeeStructureInput {
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct FeeStructureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query string for `GET /finance/fee-structures`
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct FeeStructureQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptDto {
    pub id: i64,
    pub receipt_number: String,
    pub payment_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(deserialize_with = "super::lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_statement_without_transactions() {
        let json = r#"{"student_id": 4, "total_fees": 0, "total_paid": 0, "balance": 0}"#;
        let statement: FeeStatementDto = serde_json::from_str(json).unwrap();
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn test_transaction_type_field_renamed() {
        let json = r#"{"id": 1, "date": "2024-01-10", "description": "Term 1 fees", "type": "CHARGE", "amount": "15000"}"#;
        let transaction: TransactionDto = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.kind, "CHARGE");
        assert_eq!(transaction.amount, 15000.0);
    }

    #[test]
    fn test_payment_submission_serialization() {
        let submission = PaymentSubmission {
            student_id: 7,
            amount: 2500.0,
            payment_method: PaymentMethod::BankTransfer,
            reference_number: Some("TRX-1".to_string()),
            payment_date: None,
            fee_structure_id: None,
            notes: None,
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "student_id": 7,
                "amount": 2500.0,
                "payment_method": "bank_transfer",
                "reference_number": "TRX-1"
            })
        );
    }
}
