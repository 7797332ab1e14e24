//! Keyword tables driving the interpretation
//!
//! Everything the interpreter matches against lives here: verb stems per kind,
//! command and period keywords, relative day words, prepositions and the
//! keyword to category map. A `Lexicon` is loaded once at startup (built-in
//! defaults or a JSON file) and then only read, so it can be shared freely
//! between threads.
//!
//! All keywords are compared against folded text (lowercase, no accents).
//! `Lexicon::load` folds what it reads, so a file may spell `salário` or
//! `salario` indifferently.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::entry::Kind;
use crate::interpret::normalize::fold;
use crate::period::Period;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub stems: KindStems,
    /// Order in which kinds are tried, first match wins
    pub kind_priority: Vec<Kind>,
    pub commands: CommandWords,
    pub periods: PeriodWords,
    pub relative_days: Vec<RelativeDay>,
    pub prepositions: Vec<String>,
    pub categories: Vec<CategoryRule>,
}

/// Prefixes of the words that reveal the kind of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindStems {
    pub expense: Vec<String>,
    pub income: Vec<String>,
    pub investment: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandWords {
    pub undo: Vec<String>,
    /// Required alongside an `undo` word
    pub last: Vec<String>,
    pub balance: Vec<String>,
    pub summary: Vec<String>,
    pub balance_default: Period,
    pub summary_default: Period,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodWords {
    pub day: Vec<String>,
    pub week: Vec<String>,
    pub month: Vec<String>,
}

/// A word standing for a day relative to the reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeDay {
    pub word: String,
    pub offset: i64,
}

/// `keyword` appearing in a description files the record under `label`.
///
/// A rule with a `kind` is preferred for records of that kind; a rule without
/// one applies to every kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub label: String,
    #[serde(default)]
    pub kind: Option<Kind>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn rules(kind: Kind, table: &[(&str, &str)]) -> Vec<CategoryRule> {
    table
        .iter()
        .map(|(keyword, label)| CategoryRule {
            keyword: keyword.to_string(),
            label: label.to_string(),
            kind: Some(kind),
        })
        .collect()
}

const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("supermercado", "alimentação"),
    ("mercado", "alimentação"),
    ("feira", "alimentação"),
    ("padaria", "alimentação"),
    ("restaurante", "alimentação"),
    ("lanche", "alimentação"),
    ("pizza", "alimentação"),
    ("ifood", "alimentação"),
    ("aluguel", "moradia"),
    ("condominio", "moradia"),
    ("luz", "contas"),
    ("energia", "contas"),
    ("agua", "contas"),
    ("gas", "contas"),
    ("internet", "contas"),
    ("telefone", "contas"),
    ("celular", "contas"),
    ("transporte", "transporte"),
    ("uber", "transporte"),
    ("99", "transporte"),
    ("taxi", "transporte"),
    ("onibus", "transporte"),
    ("gasolina", "transporte"),
    ("combustivel", "transporte"),
    ("estacionamento", "transporte"),
    ("farmacia", "saúde"),
    ("dentista", "saúde"),
    ("medico", "saúde"),
    ("curso", "educação"),
    ("faculdade", "educação"),
    ("escola", "educação"),
    ("livro", "educação"),
    ("cinema", "lazer"),
    ("show", "lazer"),
    ("viagem", "viagens"),
    ("hotel", "viagens"),
    ("passagem", "viagens"),
    ("mercado livre", "casa"),
    ("magalu", "casa"),
    ("amazon", "casa"),
    ("mobiliario", "casa"),
    ("roupa", "pessoais"),
    ("roupas", "pessoais"),
    ("sapato", "pessoais"),
    ("barbearia", "pessoais"),
    ("imposto", "impostos"),
    ("taxa", "taxas"),
    ("tarifa", "taxas"),
    ("banco", "taxas"),
];

const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("salario", "salário"),
    ("ferias", "salário"),
    ("freela", "freelance"),
    ("freelancer", "freelance"),
    ("bico", "freelance"),
    ("bonus", "bônus"),
    ("comissao", "comissões"),
    ("aluguel", "aluguel"),
    ("venda", "venda de itens"),
    ("juros", "rendimentos"),
    ("rendimentos", "rendimentos"),
    ("dividendos", "rendimentos"),
    ("presente", "presentes/doações"),
    ("doacao", "presentes/doações"),
    ("premio", "prêmios"),
];

const INVESTMENT_CATEGORIES: &[(&str, &str)] = &[
    ("cdb", "renda fixa"),
    ("lci", "renda fixa"),
    ("lca", "renda fixa"),
    ("tesouro", "tesouro direto"),
    ("poupanca", "poupança"),
    ("fundo", "fundos"),
    ("fii", "fundos imobiliários"),
    ("acoes", "ações"),
    ("acao", "ações"),
    ("cripto", "cripto"),
    ("bitcoin", "cripto"),
];

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stems: KindStems::default(),
            kind_priority: vec![Kind::Investment, Kind::Income, Kind::Expense],
            commands: CommandWords::default(),
            periods: PeriodWords::default(),
            relative_days: vec![
                RelativeDay { word: "hoje".into(), offset: 0 },
                RelativeDay { word: "ontem".into(), offset: -1 },
                RelativeDay { word: "anteontem".into(), offset: -2 },
                RelativeDay { word: "amanha".into(), offset: 1 },
            ],
            prepositions: words(&[
                "de", "do", "da", "no", "na", "nos", "nas", "em", "com", "para", "pra",
            ]),
            categories: [
                rules(Kind::Expense, EXPENSE_CATEGORIES),
                rules(Kind::Income, INCOME_CATEGORIES),
                rules(Kind::Investment, INVESTMENT_CATEGORIES),
            ]
            .concat(),
        }
    }
}

impl Default for KindStems {
    fn default() -> Self {
        Self {
            // `sal-` alone would also catch "salão" and "salada"
            expense: words(&["gast", "pag", "compr", "saquei", "retirei"]),
            income: words(&[
                "receb",
                "ganh",
                "salari",
                "entrou na conta",
                "caiu na conta",
                "depositaram",
                "pagaram",
            ]),
            // `aplic-` alone would also catch "aplicativo"
            investment: words(&[
                "invest", "apliq", "aplico", "aplicou", "aplicamos", "aplicar", "aplicac",
                "aplicad", "aport",
            ]),
        }
    }
}

impl Default for CommandWords {
    fn default() -> Self {
        Self {
            undo: words(&["desfazer", "desfaz", "desfaca"]),
            last: words(&["ultimo", "ultima"]),
            balance: words(&["saldo"]),
            summary: words(&["resumo", "relatorio"]),
            balance_default: Period::Day,
            summary_default: Period::Month,
        }
    }
}

impl Default for PeriodWords {
    fn default() -> Self {
        Self {
            day: words(&["dia", "hoje", "diario"]),
            week: words(&["semana", "semanal"]),
            month: words(&["mes", "mensal"]),
        }
    }
}

impl KindStems {
    pub fn of(&self, kind: Kind) -> &[String] {
        match kind {
            Kind::Expense => &self.expense,
            Kind::Income => &self.income,
            Kind::Investment => &self.investment,
        }
    }
}

impl PeriodWords {
    /// Which period a single folded word names, if any
    pub fn lookup(&self, word: &str) -> Option<Period> {
        [
            (Period::Day, &self.day),
            (Period::Week, &self.week),
            (Period::Month, &self.month),
        ]
        .into_iter()
        .find(|(_, list)| list.iter().any(|w| w == word))
        .map(|(p, _)| p)
    }
}

impl Lexicon {
    /// Read a lexicon from a JSON file; absent fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading lexicon file: {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Parsing lexicon JSON in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let lexicon: Lexicon = serde_json::from_str(raw)?;
        Ok(lexicon.folded())
    }

    /// Fold every keyword so that it compares equal to normalized text
    pub fn folded(mut self) -> Self {
        let fold_all = |list: &mut Vec<String>| {
            for w in list.iter_mut() {
                *w = fold(w);
            }
        };
        fold_all(&mut self.stems.expense);
        fold_all(&mut self.stems.income);
        fold_all(&mut self.stems.investment);
        fold_all(&mut self.commands.undo);
        fold_all(&mut self.commands.last);
        fold_all(&mut self.commands.balance);
        fold_all(&mut self.commands.summary);
        fold_all(&mut self.periods.day);
        fold_all(&mut self.periods.week);
        fold_all(&mut self.periods.month);
        fold_all(&mut self.prepositions);
        for rel in &mut self.relative_days {
            rel.word = fold(&rel.word);
        }
        for rule in &mut self.categories {
            rule.keyword = fold(&rule.keyword);
        }
        self
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.iter().any(|p| p == word)
    }

    pub fn relative_offset(&self, word: &str) -> Option<i64> {
        self.relative_days
            .iter()
            .find(|rel| rel.word == word)
            .map(|rel| rel.offset)
    }
}
