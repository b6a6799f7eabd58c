//! Read-only ledger views for the display layer.

use rust_decimal::RoundingStrategy;
use serde::Serialize;
use spread_ledger::Ledger;
use spread_types::{Amount, DISPLAY_DECIMALS};

/// Shown when the ledger has no rows.
pub const EMPTY_LEDGER_MESSAGE: &str = "No records yet.";

/// Format an amount with exactly two decimal places.
pub fn format_amount(amount: Amount) -> String {
    let rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.prec$}", rounded, prec = DISPLAY_DECIMALS as usize)
}

/// One receiver line under a payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiverLine {
    pub receiver: String,
    pub amount: String,
}

/// Everything one payer has spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayerSection {
    pub payer: String,
    pub receivers: Vec<ReceiverLine>,
}

/// Serializable snapshot of the ledger with formatted amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub payers: Vec<PayerSection>,
}

impl LedgerView {
    pub fn is_empty(&self) -> bool {
        self.payers.is_empty()
    }
}

/// Build the display view of `ledger`.
pub fn ledger_view(ledger: &Ledger) -> LedgerView {
    let payers = ledger
        .iter()
        .map(|(payer, row)| PayerSection {
            payer: payer.to_string(),
            receivers: row
                .iter()
                .map(|(receiver, amount)| ReceiverLine {
                    receiver: receiver.to_string(),
                    amount: format_amount(*amount),
                })
                .collect(),
        })
        .collect();
    LedgerView { payers }
}

/// Plain-text rendering, one line per payer heading and receiver.
pub fn render_lines(ledger: &Ledger) -> Vec<String> {
    let view = ledger_view(ledger);
    if view.is_empty() {
        return vec![EMPTY_LEDGER_MESSAGE.to_string()];
    }
    let mut lines = Vec::new();
    for section in &view.payers {
        lines.push(format!("{} spread:", section.payer));
        for line in &section.receivers {
            lines.push(format!("  {}: {}", line.receiver, line.amount));
        }
    }
    lines
}
