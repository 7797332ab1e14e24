//! In-memory stand-in for the storage and query collaborators
//!
//! Transactions are appended to a journal and commands are answered from it,
//! which makes it possible to try a whole conversation from the command line.

use chrono::NaiveDate;
use tracing::debug;

use crate::entry::{format_brl, Kind, TransactionRecord};
use crate::interpret::{CommandRequest, Interpretation};
use crate::summary::Summary;

#[derive(Debug, Default)]
pub struct Journal {
    records: Vec<TransactionRecord>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Apply an interpretation and produce the reply for the user
    pub fn apply(&mut self, interp: &Interpretation, reference: NaiveDate) -> String {
        match interp {
            Interpretation::Transaction(rec) => {
                self.records.push(rec.clone());
                debug!(count = self.records.len(), "recorded");
                format!("Anotado ✅ {}", rec)
            }
            Interpretation::Command(cmd) => self.execute(*cmd, reference),
            Interpretation::Unrecognized(_) => String::from(
                "Não entendi. Tente algo como 'gastei 37,90 no mercado' ou 'resumo da semana'.",
            ),
        }
    }

    fn execute(&mut self, cmd: CommandRequest, reference: NaiveDate) -> String {
        let Some(window) = cmd.window(reference) else {
            return match self.records.pop() {
                Some(rec) => format!("Último lançamento removido ✅ ({})", rec),
                None => String::from("Não há lançamentos para desfazer."),
            };
        };
        let sum = Summary::over(window, &self.records);
        match cmd {
            CommandRequest::Balance { .. } => {
                format!("Saldo de {}: {}", sum.window(), format_brl(sum.balance()))
            }
            _ => {
                let mut reply =
                    format!("Resumo de {} ({} lançamentos)", sum.window(), sum.count());
                for kind in Kind::ALL {
                    let total = format_brl(sum.query(kind));
                    reply.push_str(&format!("\n  {}: {}", kind.label(), total));
                }
                reply.push_str(&format!("\n  saldo: {}", format_brl(sum.balance())));
                reply
            }
        }
    }
}
