//! Console formatting for cultures.

use colored::Colorize;
use farmtech::{Culture, StoreSummary};

const RULE: &str = "-----------------------------------------";

/// Detail block for one culture.
pub fn culture_details(culture: &Culture) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("ID: {}\n", culture.id));
    out.push_str(&format!("Crop: {}\n", culture.crop_type.label()));
    out.push_str(&format!("Area: {} m²\n", culture.area));
    out.push_str(&format!("Shape: {}\n", culture.dimensions));

    if culture.inputs.is_empty() {
        out.push_str("Inputs: none registered\n");
    } else {
        out.push_str("Inputs:\n");
        out.push_str(&input_lines(culture));
    }
    out.push_str(RULE);
    out
}

/// Numbered input lines, positions starting at 1.
pub fn input_lines(culture: &Culture) -> String {
    culture
        .inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            format!(
                "  [{}] {} - {} per m², {} units required\n",
                i + 1,
                input.name,
                input.rate_per_area,
                input.total_required
            )
        })
        .collect()
}

/// One-line row used when picking a culture.
pub fn culture_row(culture: &Culture) -> String {
    format!(
        "ID: {} | {} | {} m² | {} inputs",
        culture.id,
        culture.crop_type.label(),
        culture.area,
        culture.inputs.len()
    )
}

/// Totals line shown under a listing.
pub fn summary_line(summary: &StoreSummary) -> String {
    let by_crop: Vec<String> = summary
        .area_by_crop
        .iter()
        .map(|(crop, area)| format!("{} {} m²", crop, area))
        .collect();

    format!(
        "{} cultures, {} m² total ({}), {} inputs",
        summary.total_cultures,
        summary.total_area,
        by_crop.join(", "),
        summary.total_inputs
    )
}

/// Print every culture, or a notice when there are none.
pub fn print_listing(cultures: &[Culture], summary: &StoreSummary) {
    println!();
    println!("{}", "Registered cultures".cyan().bold());
    if cultures.is_empty() {
        println!("No cultures registered yet.");
        return;
    }
    for culture in cultures {
        println!("{}", culture_details(culture));
    }
    println!("{}", summary_line(summary).white().bold());
}
