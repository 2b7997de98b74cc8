//! Panel table rendering
//!
//! One renderer serves `dpt panel` and `dpt price`. The trailing Total row
//! reproduces the financial contract exactly: the sum over the
//! total-price column.

use console::style;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::engine::panel::Panel;

const HEADERS: [&str; 9] = [
    "TYPE", "BRAND", "ORDER NO", "SPEC", "QTY", "PRICE", "TOTAL", "UPDATED", "NOTE",
];

/// JSON payload for one rendered panel
#[derive(Serialize)]
struct PanelReport<'a> {
    subsystem: &'a str,
    #[serde(flatten)]
    panel: &'a Panel,
    total: f64,
    warnings: &'a [String],
}

/// Render one panel in the requested format
pub fn render_panel(
    panel: &Panel,
    subsystem: &str,
    warnings: &[String],
    format: OutputFormat,
    quiet: bool,
) {
    match format {
        OutputFormat::Auto | OutputFormat::Tsv => render_tsv(panel, subsystem, quiet),
        OutputFormat::Csv => render_csv(panel),
        OutputFormat::Md => render_md(panel, subsystem),
        OutputFormat::Json => render_json(panel, subsystem, warnings),
    }

    if format != OutputFormat::Json {
        for warning in warnings {
            eprintln!("{} {}", style("!").yellow().bold(), warning);
        }
    }
}

fn format_qty(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{:.2}", qty)
    }
}

fn render_tsv(panel: &Panel, subsystem: &str, quiet: bool) {
    if !quiet {
        println!("{}", style(subsystem).bold());
    }

    let widths = [22, 12, 14, 20, 7, 10, 11, 10, 40];
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:<width$}", style(h).bold().dim(), width = w))
        .collect();
    println!("{}", header.join(" "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + widths.len() - 1));

    for row in panel.rows() {
        println!(
            "{:<22} {:<12} {:<14} {:<20} {:>7} {:>10.2} {:>11.2} {:<10} {}",
            truncate_str(row.kind, 22),
            truncate_str(row.brand, 12),
            truncate_str(row.order_number, 14),
            truncate_str(row.specification, 20),
            format_qty(row.quantity),
            row.price,
            row.total_price,
            row.last_price_update,
            row.note,
        );
    }

    println!(
        "{:<22} {:<12} {:<14} {:<20} {:>7} {:>10} {}",
        style("Total").bold(),
        "",
        "",
        "",
        "",
        "",
        style(format!("{:>11.2}", panel.total())).bold()
    );

    if !quiet {
        println!();
        println!("{} row(s)", style(panel.len()).cyan());
    }
}

fn render_csv(panel: &Panel) {
    println!("type,brand,order_number,specification,quantity,price,total_price,last_price_update,note");
    for row in panel.rows() {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            escape_csv(row.kind),
            escape_csv(row.brand),
            escape_csv(row.order_number),
            escape_csv(row.specification),
            format_qty(row.quantity),
            row.price,
            row.total_price,
            row.last_price_update,
            escape_csv(row.note),
        );
    }
    println!("Total,,,,,,{},,", panel.total());
}

fn render_md(panel: &Panel, subsystem: &str) {
    println!("## {}\n", subsystem);

    let mut builder = Builder::default();
    builder.push_record(HEADERS);
    for row in panel.rows() {
        builder.push_record([
            row.kind.to_string(),
            row.brand.to_string(),
            row.order_number.to_string(),
            row.specification.to_string(),
            format_qty(row.quantity),
            format!("{:.2}", row.price),
            format!("{:.2}", row.total_price),
            row.last_price_update.to_string(),
            row.note.to_string(),
        ]);
    }
    builder.push_record([
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", panel.total()),
        String::new(),
        String::new(),
    ]);
    println!("{}", builder.build().with(Style::markdown()));
}

fn render_json(panel: &Panel, subsystem: &str, warnings: &[String]) {
    let report = PanelReport {
        subsystem,
        panel,
        total: panel.total(),
        warnings,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} cannot serialize panel: {}", style("✗").red(), e),
    }
}
