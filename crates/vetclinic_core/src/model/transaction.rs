//! Payment transaction domain.
//!
//! # Invariants
//! - `receipt_no` and `transacted_at` are assigned on create and never
//!   change afterwards; the save path carries them over from storage.
//! - `change` always equals `|amount - amount_received|` rounded half away
//!   from zero to two places.

use super::domain::{AttentionRule, DigestTemplate, Domain, StatusCondition, TableSchema};
use super::ids::{IdSource, ReceiptNo};
use super::menu::MenuValue;
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    ensure, parse_decimal, parse_menu, require_present, RuleContext, ValidationResult,
};
use chrono::{NaiveDateTime, Timelike};
use rusqlite::types::Value;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const MISSING_MESSAGE: &str =
    "Please fill in all fields with valid numbers. Write 'n/a' for inapplicable fields.";
const AMOUNT_MESSAGE: &str = "Invalid amount. Please enter a valid number.";

/// Statuses that count as settled for dashboard purposes.
const NOMINAL_STATUSES: &[&str] = &["Authorized", "Captured"];

closed_menu! {
    pub enum TransactionType {
        DonationsFundraising => "Donations/Fundraising",
        PreventiveCarePackages => "Preventive Care Packages",
        OnlinePhoneConsultations => "Online/Phone Consultations",
        PaymentPlans => "Payment Plans",
        BoardingAndGroomingFees => "Boarding and Grooming Fees",
        EmergencyCareCharges => "Emergency Care Charges",
        ServiceFees => "Service Fees",
        ProductSales => "Product Sales",
        ConsultationFees => "Consultation Fees",
        DiagnosticServices => "Diagnostic Services",
        FollowUpAppointments => "Follow-up Appointments",
        InsuranceClaims => "Insurance Claims",
        Collaborations => "Collaborations",
        InHousePharmacy => "In-House Pharmacy",
        LicensingRegulatoryFees => "Licensing/Regulatory Fees",
    }
}

closed_menu! {
    pub enum PaymentMethod {
        BankTransfer => "Bank Transfer",
        OnlinePayment => "Online Payment",
        Check => "Check",
        Cash => "Cash",
        Credit => "Credit",
        MobilePayments => "Mobile Payments",
        Insurance => "Insurance",
        ThirdPartyService => "Third Party Service",
    }
}

closed_menu! {
    pub enum TransactionStatus {
        Canceled => "Canceled",
        Pending => "Pending",
        Authorized => "Authorized",
        Captured => "Captured",
        Failed => "Failed",
        Refunded => "Refunded",
        Chargeback => "Chargeback",
        Reversed => "Reversed",
        OnHold => "On Hold",
        Expired => "Expired",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFields {
    pub payer: String,
    pub payee: String,
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub amount_received: Decimal,
    pub payment_method: PaymentMethod,
    pub receipt_no: ReceiptNo,
    pub transacted_at: NaiveDateTime,
    pub change: Decimal,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub payer: String,
    pub payee: String,
    pub transaction_type: String,
    pub description: String,
    pub amount: String,
    pub amount_received: String,
    pub payment_method: String,
    pub status: String,
}

pub struct Transaction;

impl Domain for Transaction {
    type Fields = TransactionFields;
    type Draft = TransactionDraft;

    const KIND: DomainKind = DomainKind::Transaction;
    const SCHEMA: TableSchema = TableSchema {
        table: "transactions",
        id_column: "transaction_id",
        columns: &[
            "payer",
            "payee",
            "transaction_type",
            "transaction_desc",
            "transaction_amt",
            "amt_received",
            "payment_method",
            "receipt_no",
            "transacted_at",
            "transaction_change",
            "transaction_status",
        ],
        business_key: &[
            "payer",
            "payee",
            "transaction_type",
            "transaction_amt",
            "transacted_at",
        ],
        recent_column: None,
        attention: AttentionRule {
            status: Some(StatusCondition {
                column: "transaction_status",
                nominal: NOMINAL_STATUSES,
            }),
            upcoming: None,
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: None,
        attention: Some("transaction(s) that need your attention"),
    };
    const DUPLICATE_MESSAGE: &'static str =
        "A transaction with the same payer, payee, type, amount, and time already exists.";

    /// `receipt_no` is left at zero here; see [`Domain::assign_new`].
    fn validate(
        draft: &TransactionDraft,
        ctx: &RuleContext,
    ) -> ValidationResult<TransactionFields> {
        require_present(
            &[
                draft.payer.as_str(),
                draft.payee.as_str(),
                draft.transaction_type.as_str(),
                draft.description.as_str(),
                draft.amount.as_str(),
                draft.amount_received.as_str(),
                draft.payment_method.as_str(),
                draft.status.as_str(),
            ],
            MISSING_MESSAGE,
        )?;
        let amount = parse_decimal(&draft.amount, AMOUNT_MESSAGE)?;
        let amount_received = parse_decimal(&draft.amount_received, AMOUNT_MESSAGE)?;
        ensure(
            amount > Decimal::ZERO && amount_received >= Decimal::ZERO,
            AMOUNT_MESSAGE,
        )?;

        let transaction_type = parse_menu(
            &draft.transaction_type,
            "Please select a transaction type from the menu.",
        )?;
        let payment_method = parse_menu(
            &draft.payment_method,
            "Please select a payment method from the menu.",
        )?;
        let status = parse_menu(
            &draft.status,
            "Please select a transaction status from the menu.",
        )?;

        Ok(TransactionFields {
            payer: draft.payer.clone(),
            payee: draft.payee.clone(),
            transaction_type,
            description: draft.description.clone(),
            amount,
            amount_received,
            payment_method,
            receipt_no: 0,
            transacted_at: whole_seconds(ctx.now),
            change: change_due(amount, amount_received),
            status,
        })
    }

    fn to_draft(fields: &TransactionFields) -> TransactionDraft {
        TransactionDraft {
            payer: fields.payer.clone(),
            payee: fields.payee.clone(),
            transaction_type: fields.transaction_type.as_str().to_string(),
            description: fields.description.clone(),
            amount: fields.amount.to_string(),
            amount_received: fields.amount_received.to_string(),
            payment_method: fields.payment_method.as_str().to_string(),
            status: fields.status.as_str().to_string(),
        }
    }

    fn to_columns(fields: &TransactionFields) -> Vec<Value> {
        vec![
            codec::text(&fields.payer),
            codec::text(&fields.payee),
            codec::menu(fields.transaction_type),
            codec::text(&fields.description),
            codec::decimal(fields.amount),
            codec::decimal(fields.amount_received),
            codec::menu(fields.payment_method),
            codec::receipt(fields.receipt_no),
            codec::datetime(fields.transacted_at),
            codec::decimal(fields.change),
            codec::menu(fields.status),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<TransactionFields> {
        Ok(TransactionFields {
            payer: row.text("payer")?,
            payee: row.text("payee")?,
            transaction_type: row.menu("transaction_type")?,
            description: row.text("transaction_desc")?,
            amount: row.decimal("transaction_amt")?,
            amount_received: row.decimal("amt_received")?,
            payment_method: row.menu("payment_method")?,
            receipt_no: row.receipt("receipt_no")?,
            transacted_at: row.datetime("transacted_at")?,
            change: row.decimal("transaction_change")?,
            status: row.menu("transaction_status")?,
        })
    }

    fn assign_new(fields: &mut TransactionFields, ids: &mut dyn IdSource) {
        fields.receipt_no = ids.next_receipt_no();
    }

    fn carry_immutable(stored: &TransactionFields, candidate: &mut TransactionFields) {
        candidate.receipt_no = stored.receipt_no;
        candidate.transacted_at = stored.transacted_at;
    }
}

/// `|amount - received|`, rounded half away from zero to cents.
pub fn change_due(amount: Decimal, received: Decimal) -> Decimal {
    (amount - received)
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn whole_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::IdGenerator;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn ctx() -> RuleContext {
        RuleContext::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_milli_opt(14, 5, 9, 750)
                .unwrap(),
        )
    }

    fn draft(amount: &str, received: &str) -> TransactionDraft {
        TransactionDraft {
            payer: "Liza Soberano".to_string(),
            payee: "GenVet Clinic".to_string(),
            transaction_type: "Consultation Fees".to_string(),
            description: "Checkup".to_string(),
            amount: amount.to_string(),
            amount_received: received.to_string(),
            payment_method: "Cash".to_string(),
            status: "Captured".to_string(),
        }
    }

    #[test]
    fn change_is_absolute_and_rounded_half_up() {
        assert_eq!(change_due(dec("500"), dec("1000")), dec("500.00"));
        assert_eq!(change_due(dec("10.005"), dec("0")), dec("10.01"));
        assert_eq!(change_due(dec("100"), dec("40")), dec("60"));
    }

    #[test]
    fn amount_must_be_positive() {
        let err = Transaction::validate(&draft("0", "0"), &ctx()).unwrap_err();
        assert_eq!(err.message(), AMOUNT_MESSAGE);
        let err = Transaction::validate(&draft("100", "-5"), &ctx()).unwrap_err();
        assert_eq!(err.message(), AMOUNT_MESSAGE);
    }

    #[test]
    fn transacted_at_is_truncated_to_seconds() {
        let fields = Transaction::validate(&draft("250", "300"), &ctx()).unwrap();
        assert_eq!(
            fields.transacted_at,
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap()
        );
        assert_eq!(fields.change, dec("50"));
    }

    #[test]
    fn engine_assigned_values_survive_edits() {
        let mut stored = Transaction::validate(&draft("250", "300"), &ctx()).unwrap();
        let mut ids = IdGenerator::with_rng(StdRng::seed_from_u64(7));
        Transaction::assign_new(&mut stored, &mut ids);

        let later = RuleContext::new(stored.transacted_at + chrono::Duration::hours(2));
        let mut candidate = Transaction::validate(&draft("250", "250"), &later).unwrap();
        Transaction::carry_immutable(&stored, &mut candidate);

        assert_eq!(candidate.receipt_no, stored.receipt_no);
        assert_eq!(candidate.transacted_at, stored.transacted_at);
        assert_eq!(candidate.change, Decimal::ZERO);
    }

    #[test]
    fn nominal_statuses_are_menu_labels() {
        assert_eq!(
            NOMINAL_STATUSES
                .iter()
                .map(|label| TransactionStatus::parse(label))
                .collect::<Vec<_>>(),
            vec![
                Some(TransactionStatus::Authorized),
                Some(TransactionStatus::Captured)
            ]
        );
    }
}
