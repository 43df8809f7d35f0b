use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fluxqc_cli::types::CheckOutcome;
use fluxqc_model::{Severity, Status};
use fluxqc_standards::MessageCatalog;

pub fn print_summary(outcome: &CheckOutcome) {
    println!("File: {}", outcome.file.display());
    println!("Rows: {}  Columns: {}", outcome.rows, outcome.columns);
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }
    if let Some(path) = &outcome.status_path {
        println!("Statuses: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for status in &outcome.statuses {
        add_status_row(&mut table, status, false);
        for child in status.children() {
            add_status_row(&mut table, child, true);
        }
    }
    let overall = outcome.overall();
    table.add_row(vec![
        Cell::new("OVERALL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        severity_cell(overall).add_attribute(Attribute::Bold),
        Cell::new(overall.code()).add_attribute(Attribute::Bold),
        Cell::new(&outcome.report.process_confirmation.status_end_msg),
    ]);
    println!("{table}");
}

fn add_status_row(table: &mut Table, status: &Status, nested: bool) {
    let name = if nested {
        Cell::new("  ->").fg(Color::DarkGrey)
    } else {
        Cell::new(&status.display_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    };
    table.add_row(vec![
        name,
        severity_cell(status.severity),
        Cell::new(status.code()),
        Cell::new(&status.report_message),
    ]);
}

pub fn print_catalog(catalog: &MessageCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for entry in catalog.entries() {
        table.add_row(vec![
            Cell::new(&entry.check_id),
            severity_cell(entry.severity),
            Cell::new(entry.kind),
            Cell::new(&entry.message),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.label());
    match severity {
        Severity::Ok => cell.fg(Color::Green),
        Severity::Warning => cell.fg(Color::Yellow),
        Severity::Error => cell.fg(Color::Red),
        Severity::Fatal => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
