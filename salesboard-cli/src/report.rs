use salesboard_core::{DashboardView, FilterState};

/// Print one selection as a month-by-month table plus totals
pub fn print_report(view: &DashboardView, filter: &FilterState, record_count: usize) {
    println!(
        "Item type: {} | Year: {} | {} records loaded",
        filter.item_type.label(),
        filter.year.label(),
        record_count
    );

    if view.is_empty() {
        println!("\nNo months match the current selection.");
        return;
    }

    println!();
    for (i, label) in view.selection.labels.iter().enumerate() {
        let cells: Vec<String> = view
            .selection
            .series
            .iter()
            .map(|s| format!("{}={:>12.2}", s.name, s.points[i]))
            .collect();
        println!("{:<9} {}", label, cells.join("  "));
    }

    println!("\nMonths: {}", view.totals.months);
    for series in &view.selection.series {
        println!(
            "Total {}: {:.2}",
            series.name,
            view.totals.total(series.metric)
        );
    }
}

/// Print the filter choices a dataset offers
pub fn print_dimensions(item_types: &[String], years: &[i32], record_count: usize) {
    println!("{} records loaded", record_count);

    println!("\nItem types ({}):", item_types.len());
    for item_type in item_types {
        println!("  {item_type}");
    }

    println!("\nYears ({}):", years.len());
    for year in years {
        println!("  {year}");
    }
}
