use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use statx_core::{ExportOutcome, SheetSummary};
use statx_transform::SheetKind;

pub fn print_summary(outcome: &ExportOutcome) {
    println!("Artifact: {}", outcome.artifact.id);
    println!("Output: {}", outcome.artifact.path.display());
    println!("{}", summary_table(&outcome.sheets));
    println!(
        "{} sheet(s), {} placeholder(s) in {} ms",
        outcome.sheets.len(),
        outcome.placeholder_count(),
        outcome.elapsed.as_millis()
    );
}

pub fn summary_table(sheets: &[SheetSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Kind"),
        header_cell("Rows"),
        header_cell("Dataset"),
        header_cell("Year"),
        header_cell("Variable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    let mut total_rows = 0usize;
    for sheet in sheets {
        total_rows += sheet.rows;
        table.add_row(vec![
            Cell::new(&sheet.name).add_attribute(Attribute::Bold),
            kind_cell(sheet.kind),
            rows_cell(sheet),
            Cell::new(&sheet.dataset),
            Cell::new(sheet.year),
            Cell::new(&sheet.variable),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn kind_cell(kind: SheetKind) -> Cell {
    match kind {
        SheetKind::Data => Cell::new(kind.label()).fg(Color::Green),
        SheetKind::Placeholder => Cell::new(kind.label()).fg(Color::Yellow),
    }
}

fn rows_cell(sheet: &SheetSummary) -> Cell {
    if sheet.is_placeholder() {
        dim_cell(sheet.rows)
    } else {
        Cell::new(sheet.rows)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
