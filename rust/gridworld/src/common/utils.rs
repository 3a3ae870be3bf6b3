use crate::*;
use itertools::Itertools;
use ndarray::Array2;

/// One bracketed row per line, cells separated by a single space.
pub fn render_matrix<T, F>(m: &Array2<T>, fmt_cell: F) -> String
where
    F: Fn(&T) -> String,
{
    m.outer_iter()
        .map(|row| format!("[{}]", row.iter().map(&fmt_cell).join(" ")))
        .join("\n")
}

pub fn fmt_value(v: &Continous) -> String {
    format!("{v:8.4}")
}

pub fn fmt_label(l: &&str) -> String {
    format!("{l:>5}")
}
