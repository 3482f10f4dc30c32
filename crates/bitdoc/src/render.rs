//! Table rendering for a computed [Layout].
//!
//! Two styles are supported:
//! - **LaTeX**: a `tabular` whose `p{}` columns are proportional to field widths,
//!   a row of bit positions in `\scriptsize` and a row of `\texttt` labels.
//! - **ASCII**: a three-line diagram scaled by [Config::spaces_per_bit].

use std::fmt::Write;

use crate::{config::Config, layout::Layout};

/// Output style of [render].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Latex,
    Ascii,
}

/// Renders `layout` in the given style. Every line, including the last, ends with `\n`.
pub fn render(layout: &Layout, style: Style, config: &Config) -> String {
    match style {
        Style::Latex => latex(layout, config),
        Style::Ascii => ascii(layout, config),
    }
}

/// Renders a LaTeX `tabular` block.
pub fn latex(layout: &Layout, config: &Config) -> String {
    let mut out = String::from("\\begin{tabular}{");
    for field in &layout.fields {
        let fraction = layout.column_fraction(field, config.column_scale);
        let _ = write!(out, "p{{{fraction}\\textwidth}}");
    }
    out.push_str("}\n");

    let header: Vec<String> = layout
        .fields
        .iter()
        .map(|field| format!("\\scriptsize{{{}}}", field.bit))
        .collect();
    out.push_str(&header.join("&"));
    out.push_str("\\\\\\hline\n");

    let body: Vec<String> = layout
        .fields
        .iter()
        .map(|field| format!("\\multicolumn{{1}}{{|c|}}{{\\texttt{{{}}}}}", field.label))
        .collect();
    out.push_str(&body.join("&"));
    out.push_str("\\\\\\hline\n");

    out.push_str("\\end{tabular}\n");
    out
}

/// Renders a header of bit positions, a `+---+` border and a row of centered labels.
///
/// Labels wider than their cell are not truncated and push later cells right.
pub fn ascii(layout: &Layout, config: &Config) -> String {
    let cells: Vec<usize> = layout
        .fields
        .iter()
        .map(|field| field.width as usize * config.spaces_per_bit)
        .collect();

    let mut header = String::new();
    let mut border = String::from("+");
    let mut body = String::from("|");

    for (field, &cell) in layout.fields.iter().zip(&cells) {
        let _ = write!(header, "{:<width$}", field.bit, width = cell + 1);
        border.push_str(&"-".repeat(cell));
        border.push('+');
        let _ = write!(body, "{:^cell$}|", field.label);
    }

    format!("{}\n{border}\n{body}\n", header.trim_end())
}
