use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use copo_model::{AttainmentSection, BlendedValue, MappingTable, ReportView};

use crate::commands::RunOutcome;

pub fn print_summary(outcome: &RunOutcome) {
    let view = outcome.view.rounded();
    print_course(&view);
    print_mapping(&view.mapping);
    for section in [&view.direct, &view.indirect].into_iter().flatten() {
        print_section(section);
    }
    if !view.combined.is_empty() {
        print_combined(&view.combined);
    }
    for path in &outcome.written {
        println!("Wrote: {}", path.display());
    }
    if let Some(message) = &outcome.message {
        eprintln!("warning: {message}");
    }
    if !outcome.problems.is_empty() {
        eprintln!("Problems:");
        for problem in &outcome.problems {
            eprintln!("- {problem}");
        }
    }
}

fn print_course(view: &ReportView) {
    for (label, value) in view.course.header_fields() {
        println!("{label}: {value}");
    }
}

fn print_mapping(mapping: &MappingTable) {
    let mut table = Table::new();
    let mut header = vec![header_cell("CO/PO")];
    header.extend(mapping.columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=mapping.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &mapping.rows {
        let mut cells = vec![Cell::new(&row.label)];
        cells.extend(row.values.iter().map(|value| weight_cell(*value)));
        table.add_row(cells);
    }
    let mut footer = vec![
        Cell::new(&mapping.footer.label)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    footer.extend(
        mapping
            .footer
            .values
            .iter()
            .map(|value| Cell::new(format!("{value:.2}")).add_attribute(Attribute::Bold)),
    );
    table.add_row(footer);
    println!("{table}");
}

fn print_section(section: &AttainmentSection) {
    println!();
    println!("{} attainment:", capitalize(section.kind.as_str()));

    if !section.co_series.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("CO"), header_cell("Attainment")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for point in &section.co_series {
            table.add_row(vec![
                Cell::new(&point.label),
                Cell::new(format!("{:.2}", point.value)),
            ]);
        }
        println!("{table}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("PO/PSO"),
        header_cell("Attainment"),
        header_cell(&format!("x{}", section.kind.weight())),
        header_cell(&section.comparison_label),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for ((point, weighted), comparison) in section
        .po_series
        .iter()
        .zip(&section.weighted_series)
        .zip(&section.comparison)
    {
        table.add_row(vec![
            Cell::new(&point.label),
            value_cell(point.value),
            value_cell(weighted.value),
            dim_cell(format!("{:.2}", comparison.mapping)),
        ]);
    }
    println!("{table}");
}

fn print_combined(values: &[BlendedValue]) {
    println!();
    println!("Final PO/PSO attainment (80% direct + 20% indirect):");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("PO/PSO"),
        header_cell("Direct (80%)"),
        header_cell("Indirect (20%)"),
        header_cell("Final"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for value in values {
        table.add_row(vec![
            Cell::new(value.code.label()),
            value_cell(value.direct80),
            value_cell(value.indirect20),
            value_cell(value.final_value).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
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

/// Zero weights are dimmed so the mapped cells stand out.
fn weight_cell(value: f64) -> Cell {
    if value == 0.0 {
        dim_cell(format!("{value:.2}"))
    } else {
        Cell::new(format!("{value:.2}"))
    }
}

fn value_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
