use std::fmt;

use crate::interpret::Interpretation;

/// Box-drawn table of interpreted messages, one line per message
pub struct Table<'d> {
    data: &'d [(String, Interpretation)],
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
    right: bool,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

const HEADERS: [&str; 5] = ["tipo", "valor", "data", "categoria", "descrição"];

impl<'d> Table<'d> {
    pub fn from(data: &'d [(String, Interpretation)]) -> Self {
        Self { data }
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = HEADERS
            .iter()
            .map(|h| ColFmt::with_label(BoxFmt::from(h.to_string()), *h == "valor"))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for (text, interp) in self.data {
            grid.push_line(BoxFmt::from(text.clone()), BoxFmt::row(interp));
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn empty() -> Self {
        Self::from(String::new())
    }

    fn row(interp: &Interpretation) -> Vec<Self> {
        match interp {
            Interpretation::Transaction(rec) => vec![
                Self::from(rec.kind.label().to_string()),
                Self::from(rec.amount.to_string()),
                Self::from(rec.date.format("%d/%m/%Y").to_string()),
                rec.category.clone().map(Self::from).unwrap_or_else(Self::empty),
                rec.description.clone().map(Self::from).unwrap_or_else(Self::empty),
            ],
            Interpretation::Command(cmd) => vec![
                Self::from(String::from("comando")),
                Self::empty(),
                Self::empty(),
                Self::empty(),
                Self::from(cmd.to_string()),
            ],
            Interpretation::Unrecognized(_) => vec![
                Self::from(String::from("?")),
                Self::empty(),
                Self::empty(),
                Self::empty(),
                Self::from(String::from("não entendido")),
            ],
        }
    }

    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let pad = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", pad, self.text)
        } else {
            write!(f, " {}{} ", self.text, pad)
        }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt, right: bool) -> Self {
        Self {
            width: label.width,
            label,
            boxes: Vec::new(),
            right,
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }

    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, false)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::from("mensagem")), false),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (col, b) in self.columns.iter_mut().zip(boxes) {
            col.push(b);
        }
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;
        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";
