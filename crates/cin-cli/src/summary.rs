use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cin_model::RuleType;
use cin_validate::{RuleDefinition, RuleSummary, ValidationReport};

/// Render the per-rule summary of a run.
pub fn summary_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Table"),
        header_cell("Type"),
        header_cell("Issues"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for summary in report.summaries() {
        table.add_row(vec![
            Cell::new(summary.code.as_str()).add_attribute(Attribute::Bold),
            Cell::new(summary.table.name()).fg(Color::Blue),
            type_cell(summary.rule_type),
            count_cell(summary.issue_count, summary.rule_type),
            status_cell(&summary),
            Cell::new(&summary.message),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.error_count() + report.query_count()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{} errors, {} queries",
            report.error_count(),
            report.query_count()
        )),
    ]);
    table
}

pub fn print_summary(report: &ValidationReport) {
    println!("{}", summary_table(report));
    let failed: Vec<_> = report.failed_rules().collect();
    if !failed.is_empty() {
        eprintln!("Rules that could not run:");
        for outcome in failed {
            if let Some(error) = outcome.error() {
                eprintln!("- {}: {error}", outcome.definition().code);
            }
        }
    }
}

/// Render the list of registered rules.
pub fn rules_table<'a>(definitions: impl Iterator<Item = &'a RuleDefinition>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Table", "Type", "Message"]);
    apply_table_style(&mut table);
    for definition in definitions {
        table.add_row(vec![
            Cell::new(definition.code.as_str()),
            Cell::new(definition.table.name()),
            type_cell(definition.rule_type),
            Cell::new(&definition.message),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::UpperBoundary(Width::Fixed(22)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(55)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn type_cell(rule_type: RuleType) -> Cell {
    match rule_type {
        RuleType::Error => Cell::new("ERROR").fg(Color::Red),
        RuleType::Query => Cell::new("QUERY").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, rule_type: RuleType) -> Cell {
    if count == 0 {
        return dim_cell(count);
    }
    let color = match rule_type {
        RuleType::Error => Color::Red,
        RuleType::Query => Color::Yellow,
    };
    Cell::new(count).fg(color).add_attribute(Attribute::Bold)
}

fn status_cell(summary: &RuleSummary) -> Cell {
    if summary.failed.is_some() {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if summary.issue_count == 0 {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("!").fg(Color::Yellow)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
