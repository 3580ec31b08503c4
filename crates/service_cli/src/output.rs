//! Result rendering: JSON documents and box-drawing tables

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output formats supported by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON on stdout
    Json,
    /// Human-readable tables
    #[default]
    Table,
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a currency-like amount with two decimals.
pub fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a fraction as a percentage.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a multiple, e.g. `8.50x`.
pub fn multiple(value: f64) -> String {
    format!("{:.2}x", value)
}

/// Column-aligned table drawn with box characters.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render blank, extra cells are dropped.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return self.clone().row(["(no data)"]).render();
        }
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
                .collect();
            format!("│{}│", padded.join("│"))
        };

        let mut out = vec![rule("┌", "┬", "┐"), line(&self.headers), rule("├", "┼", "┤")];
        out.extend(self.rows.iter().map(|row| line(row)));
        out.push(rule("└", "┴", "┘"));
        out.join("\n")
    }

    pub fn print(&self) {
        println!("\n{}", self.render());
    }
}
