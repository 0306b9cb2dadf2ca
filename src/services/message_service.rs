//! Notification text rendering.
//!
//! The six templates below are a fixed external contract consumed by the
//! agent chats, down to section labels, line breaks and trailing spaces. Do
//! not "clean them up"; byte-identical output is what the tests pin.

use crate::models::{CollectionKind, RequestRecord, Status};

/// Render the notification for one `(collection, status)` transition.
///
/// Pure and total: every combination renders, missing fields degrade to
/// their documented fallbacks. `destination` is the resolved manager chat
/// id; the deposit pending template embeds it.
pub fn format_notification(
    kind: CollectionKind,
    status: Status,
    record: &RequestRecord,
    record_id: &str,
    destination: &str,
) -> String {
    match (kind, status) {
        (CollectionKind::Deposit, Status::Approved) => deposit_approved(record, record_id),
        (CollectionKind::Deposit, Status::Pending) => deposit_pending(record, record_id, destination),
        (CollectionKind::Deposit, Status::Rejected) => deposit_rejected(record, record_id),
        (CollectionKind::Withdraw, Status::Approved) => withdraw_approved(record, record_id),
        (CollectionKind::Withdraw, Status::Pending) => withdraw_pending(record, record_id),
        (CollectionKind::Withdraw, Status::Rejected) => withdraw_rejected(record, record_id),
    }
}

/// Amount rendered as a plain number, shortest form (`500`, `12.5`).
/// Non-numeric amounts degrade to `N/A` rather than erroring.
fn amount_short(record: &RequestRecord) -> String {
    match record.amount_f64() {
        Some(amount) => amount.to_string(),
        None => "N/A".to_string(),
    }
}

/// Amount rendered with exactly two decimal places (`12.50`).
/// Same `N/A` degradation as [`amount_short`].
fn amount_fixed(record: &RequestRecord) -> String {
    match record.amount_f64() {
        Some(amount) => format!("{:.2}", amount),
        None => "N/A".to_string(),
    }
}

fn deposit_approved(record: &RequestRecord, record_id: &str) -> String {
    format!(
        "APPROVED \nBankTransfer Agents\nDeposit Request № {}\nAgent: {}\nPayment number: {}\nAmount: {} BDT\nCustomer: {}\nExt_trn_id: {}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        amount_short(record),
        record.customer_id(record_id),
        record.display_or("trxId", "N/A"),
    )
}

fn deposit_pending(record: &RequestRecord, record_id: &str, destination: &str) -> String {
    format!(
        "BankTransfer Agents\nDeposit Request № {}\nAgent:  {} \nPayment number: {}\nAmount: {} BDT \nCustomer: {}\nChatId - {}\nid: {}\next_trn_id: {}\n{}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        amount_fixed(record),
        record.customer_id(record_id),
        destination,
        record.display_or("bankid", "N/A"),
        record.display_or("trxId", "N/A"),
        record.display_or("note", ""),
    )
}

fn deposit_rejected(record: &RequestRecord, record_id: &str) -> String {
    format!(
        "REJECTED\nBankTransfer Agents\nDeposit Request № {}\nAgent: {}\nPayment number: {}\nAmount: {} BDT \nCustomer: {}\nBankTransferComment: {}\nExt_trn_id: {}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        amount_fixed(record),
        record.customer_id(record_id),
        record.display_or("region", "N/A"),
        record.display_or("trxId", "N/A"),
    )
}

fn withdraw_approved(record: &RequestRecord, record_id: &str) -> String {
    format!(
        "SENT\nBankTransfer Agents\nWithdrawal Request № {}\nAgent: {}\nPayment number: {}\nAmount: {} BDT\nCustomer: {} {}\nBankTransferComment: {}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        record.amount_raw(),
        record.customer_id(record_id),
        record.display_or("name", ""),
        record.display_or("trxId", "N/A"),
    )
}

fn withdraw_pending(record: &RequestRecord, record_id: &str) -> String {
    format!(
        "BankTransfer Agents\nWithdrawal Request № {}\nAgent: {}\nPayment number: {}\nAmount: {} BDT \nCustomer: {} ({})\n- User data -\nid: {}\n{}: {}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        record.amount_raw(),
        record.customer_id(record_id),
        record.display_or("name", "N/A"),
        record.display_or("bankid", "N/A"),
        record.display_or("note", "Wallet Number"),
        record.number(),
    )
}

fn withdraw_rejected(record: &RequestRecord, record_id: &str) -> String {
    format!(
        "CANCELED\nBankTransfer Agents\nWithdrawal Request № {}\nAgent: {}\nPayment number: {}\nAmount: {} BDT \nCustomer: {} {}\nBankTransferComment: {}",
        record.display_or("requestId", "N/A"),
        record.display_or("method", "N/A"),
        record.number(),
        record.amount_raw(),
        record.customer_id(record_id),
        record.display_or("name", ""),
        record.display_or("reason", "N/A"),
    )
}
