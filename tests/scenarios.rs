use anota::{
    interpret, Amount, CommandRequest, FieldError, Interpretation, Interpreter, Kind, Lexicon,
    Message, Period, TransactionRecord,
};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

macro_rules! dt {
    ( $y:tt - $m:tt - $d:tt ) => {
        NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
    };
}

fn reference() -> NaiveDateTime {
    dt!(2024-8-10).and_hms_opt(18, 30, 0).unwrap()
}

fn run(text: &str) -> Interpretation {
    interpret(text, reference(), &Lexicon::default())
}

fn record(text: &str) -> TransactionRecord {
    match run(text) {
        Interpretation::Transaction(rec) => rec,
        other => panic!("{:?} was read as {:?}", text, other),
    }
}

fn cents(c: i64) -> Amount {
    Amount::from_cents(c).unwrap()
}

#[test]
fn expense_yesterday_at_the_supermarket() {
    let rec = record("gastei 37,90 no supermercado ontem");
    assert_eq!(rec.kind, Kind::Expense);
    assert_eq!(rec.amount, cents(3790));
    assert_eq!(rec.date, dt!(2024-8-9));
    assert_eq!(rec.category.as_deref(), Some("alimentação"));
    assert_eq!(rec.description.as_deref(), Some("supermercado"));
}

#[test]
fn salary_on_an_explicit_date() {
    let rec = record("recebi 1500 de salário 05/08");
    assert_eq!(rec.kind, Kind::Income);
    assert_eq!(rec.amount, cents(150000));
    assert_eq!(rec.amount.value().to_string(), "1500.00");
    assert_eq!(rec.date, dt!(2024-8-5));
    assert_eq!(rec.description.as_deref(), Some("salário"));
    assert_eq!(rec.category.as_deref(), Some("salário"));
}

#[test]
fn investment_today() {
    let rec = record("investi 200 em cdb hoje");
    assert_eq!(rec.kind, Kind::Investment);
    assert_eq!(rec.amount, cents(20000));
    assert_eq!(rec.date, dt!(2024-8-10));
    assert_eq!(rec.description.as_deref(), Some("cdb"));
    assert_eq!(rec.category.as_deref(), Some("renda fixa"));
}

#[test]
fn weekly_summary() {
    assert_eq!(
        run("resumo da semana"),
        Interpretation::Command(CommandRequest::Summary { period: Period::Week })
    );
}

#[test]
fn balance_of_today() {
    assert_eq!(
        run("saldo de hoje"),
        Interpretation::Command(CommandRequest::Balance { period: Period::Day })
    );
}

#[test]
fn undo_last() {
    assert_eq!(run("desfazer último"), Interpretation::Command(CommandRequest::UndoLast));
}

#[test]
fn small_talk_is_not_understood() {
    match run("oi, tudo bem?") {
        Interpretation::Unrecognized(u) => {
            assert_eq!(u.text, "oi, tudo bem?");
            assert_eq!(u.failures, vec![FieldError::AmountMissing, FieldError::TypeUnknown]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn deterministic() {
    for text in [
        "gastei 37,90 no supermercado ontem",
        "resumo da semana",
        "oi, tudo bem?",
        "gastei 10 em 31/04",
    ] {
        assert_eq!(run(text), run(text));
    }
}

#[test]
fn spacing_and_case_do_not_matter() {
    let a = record("gastei 37,90 no supermercado ontem");
    let b = record("  GASTEI   37,90 no   Supermercado ONTEM ");
    assert_eq!((a.kind, a.amount, a.date, a.category), (b.kind, b.amount, b.date, b.category));
    assert_eq!(b.description.as_deref(), Some("Supermercado"));
}

#[test]
fn amounts_are_positive_with_two_decimals() {
    for text in [
        "gastei 0,005 no bar",
        "gastei 1.234,5 no bar",
        "gastei 3 no bar",
        "gastei 5k no bar",
    ] {
        if let Interpretation::Transaction(rec) = run(text) {
            assert!(rec.amount.value() > Decimal::ZERO, "{}", text);
            assert_eq!(rec.amount.value().scale(), 2, "{}", text);
        }
    }
    assert_eq!(record("gastei 1.234,5 no bar").amount, cents(123450));
    assert_eq!(record("gastei 5k no bar").amount, cents(500000));
}

#[test]
fn explicit_date_wins_over_relative_word() {
    let rec = record("ontem paguei 50 da conta referente a 01/08");
    assert_eq!(rec.date, dt!(2024-8-1));
}

#[test]
fn invalid_date_is_reported_with_the_rest() {
    match run("comprei em 30/02") {
        Interpretation::Unrecognized(u) => {
            assert_eq!(u.failures.len(), 2);
            assert!(matches!(u.failures[0], FieldError::DateInvalid { .. }));
            assert_eq!(u.failures[1], FieldError::AmountMissing);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn command_precedence() {
    assert_eq!(
        run("resumo do saldo"),
        Interpretation::Command(CommandRequest::Balance { period: Period::Day })
    );
    assert_eq!(
        run("desfazer o último saldo"),
        Interpretation::Command(CommandRequest::UndoLast)
    );
}

#[test]
fn kind_precedence() {
    assert_eq!(record("paguei 300 e investi em cdb").kind, Kind::Investment);
    assert_eq!(record("gastei 20 do que recebi").kind, Kind::Income);
}

#[test]
fn future_dates_are_kept() {
    assert_eq!(record("vou pagar 120 de luz amanhã").date, dt!(2024-8-11));
    assert_eq!(record("aluguel de 900, vou pagar dia 15").date, dt!(2024-8-15));
}

#[test]
fn weekday_names() {
    assert_eq!(record("gastei 45 no cinema na quinta-feira").date, dt!(2024-8-8));
}

#[test]
fn shared_interpreter_across_threads() {
    let interpreter = std::sync::Arc::new(Interpreter::default());
    let handles = (0..4)
        .map(|i| {
            let interpreter = interpreter.clone();
            std::thread::spawn(move || {
                let msg = Message::new(format!("gastei {} no bar", i + 1), reference(), i);
                interpreter.interpret(&msg)
            })
        })
        .collect::<Vec<_>>();
    for (i, h) in handles.into_iter().enumerate() {
        match h.join().unwrap() {
            Interpretation::Transaction(rec) => assert_eq!(rec.amount, cents(100 * (i as i64 + 1))),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn records_round_trip_through_json() {
    let rec = record("gastei 37,90 no supermercado ontem");
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["kind"], "expense");
    assert_eq!(json["date"], "2024-08-09");
    assert_eq!(json["origin"], "parsed");
    let back: TransactionRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, rec);
}
