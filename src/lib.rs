//! Interpretation of Portuguese chat messages about personal finances
//!
//! A message such as "gastei 37,90 no supermercado ontem" becomes a
//! [`TransactionRecord`], "resumo da semana" becomes a [`CommandRequest`], and
//! anything else is [`Unrecognized`] along with the reasons why.
//!
//! ```
//! use anota::{Interpretation, Interpreter, Kind, Message};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let msg = Message::new("gastei 37,90 no supermercado ontem", now, ());
//! match Interpreter::default().interpret(&msg) {
//!     Interpretation::Transaction(rec) => {
//!         assert_eq!(rec.kind, Kind::Expense);
//!         assert_eq!(rec.category.as_deref(), Some("alimentação"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

pub mod cli;
pub mod date;
pub mod entry;
pub mod interpret;
pub mod lexicon;
pub mod period;
pub mod summary;

pub use entry::{Amount, Kind, TransactionRecord};
pub use interpret::{
    interpret, CommandRequest, FieldError, Interpretation, Interpreter, Message, Unrecognized,
};
pub use lexicon::Lexicon;
pub use period::Period;
