use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labl_map::FieldStatus;
use labl_model::{CanonicalField, MappingProfile, ValidationOutcome};

use crate::types::SuggestResult;

pub fn print_suggestion(result: &SuggestResult) {
    println!("File: {}", result.file.display());
    if let Some(profile) = &result.profile {
        println!("Profile: {} ({})", profile.name, profile.id);
    }
    let state = &result.state;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in CanonicalField::ALL {
        let column = match state.status(field) {
            FieldStatus::Mapped => Cell::new(state.mapping().get(field).unwrap_or_default()),
            FieldStatus::Missing => Cell::new("missing")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            FieldStatus::Unmapped => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(field.label()),
            column,
            required_cell(field.is_required()),
        ]);
    }
    println!("{table}");

    let unused = state.unmapped_headers();
    if !unused.is_empty() {
        println!("Unused columns: {}", unused.join(", "));
    }
    if !result.dropped.is_empty() {
        let names: Vec<&str> = result.dropped.iter().map(CanonicalField::label).collect();
        println!("Not found in this file: {}", names.join(", "));
    }
    print_validation(&state.validate());
}

pub fn print_validation(outcome: &ValidationOutcome) {
    match outcome.message() {
        Some(message) => eprintln!("{message}"),
        None => println!("All required fields are mapped."),
    }
}

pub fn print_profile(profile: &MappingProfile) {
    println!("Profile: {}", profile.name);
    println!("Id: {}", profile.id);
    if let Some(description) = &profile.description {
        println!("Description: {description}");
    }
    println!(
        "Created: {}",
        profile.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    apply_table_style(&mut table);
    for (field, column) in &profile.mapping {
        table.add_row(vec![Cell::new(field.label()), Cell::new(column)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        dim_cell("no")
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
