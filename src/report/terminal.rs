use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::license::aliases::{
    alias_collisions, CanonicalLabel, CANONICAL_LABELS, OTHER, OTHER_LICENSES, REVERSE_LICENSES,
};
use crate::license::standardizer::LicenseLookup;
use crate::models::{Field, RegistryMapping};

/// Render the outcome of a registry import: record count and per-field coverage.
pub fn render_import(registry: &RegistryMapping, snapshot: &Path, quiet: bool) {
    if quiet {
        println!("Records: {}  Snapshot: {}", registry.len(), snapshot.display());
        return;
    }

    println!(
        "\n {} v{}",
        "registry-sync".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        " {} {} records written to {}\n",
        "→".cyan(),
        registry.len().to_string().green(),
        snapshot.display()
    );

    if registry.is_empty() {
        return;
    }

    let mut table = new_table(&["Field", "Records", "Coverage"]);
    for field in Field::ALL {
        let count = registry
            .values()
            .filter(|record| record.get(field).is_some())
            .count();
        let coverage = count as f64 * 100.0 / registry.len() as f64;
        table.add_row(vec![
            Cell::new(field.key()),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{coverage:.1}%")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

/// Render raw license strings next to their standardized labels.
pub fn render_licenses(lookups: &[LicenseLookup]) {
    let mut table = new_table(&["Raw", "Standardized"]);
    for lookup in lookups {
        let cell = match lookup.standardized {
            Some(label) if !lookup.known => Cell::new(label).fg(Color::Yellow),
            Some(label) if label == OTHER => Cell::new(label).fg(Color::Blue),
            Some(label) => Cell::new(label).fg(Color::Green),
            None => Cell::new("(none)").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(lookup.raw), cell]);
    }
    println!("{table}");
}

/// Render every canonical label with its aliases, then the `Other` overrides.
pub fn render_aliases() {
    let mut table = new_table(&["Canonical", "Aliases"]);
    for (label, aliases) in REVERSE_LICENSES {
        table.add_row(vec![
            Cell::new(label_text(*label)).add_attribute(Attribute::Bold),
            Cell::new(aliases.join("\n")),
        ]);
    }
    for label in CANONICAL_LABELS {
        if REVERSE_LICENSES.iter().all(|(l, _)| *l != Some(*label)) {
            table.add_row(vec![
                Cell::new(label).add_attribute(Attribute::Bold),
                Cell::new("(no aliases)").fg(Color::DarkGrey),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new(OTHER).add_attribute(Attribute::Bold),
        Cell::new(OTHER_LICENSES.join("\n")),
    ]);
    println!("{table}");

    for (alias, labels) in alias_collisions(OTHER_LICENSES, REVERSE_LICENSES) {
        let labels: Vec<&str> = labels.into_iter().map(label_text).collect();
        println!(
            " {} {:?} is listed under {}; the last one wins",
            "[WARN]".yellow().bold(),
            alias,
            labels.join(", ")
        );
    }
}

fn label_text(label: CanonicalLabel) -> &'static str {
    label.unwrap_or("(none)")
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}
