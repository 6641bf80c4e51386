//! Interactive menu for registering and editing cultures.
//!
//! Presents a menu-driven interface using `dialoguer`. Every operator entry
//! goes through the library's parsers; a rejected value is reported and the
//! prompt repeats. Only "Exit" ends the session.

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use farmtech::{
    parse_dimension, parse_rate, CropType, DimensionUpdate, Dimensions, FarmTechError, ShapeKind,
    Storage, StorageConfig,
};

use crate::render;
use crate::session::Session;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Runs the interactive menu loop.
///
/// # Errors
///
/// Returns an error if the terminal prompt itself fails.
pub fn run(config: &StorageConfig) -> CliResult<()> {
    println!("{}", "FarmTech Solutions - Digital Agriculture".cyan().bold());
    let mut session = Session::open(Storage::new(config));

    loop {
        println!();
        let items = &[
            "Add a culture",
            "List cultures",
            "Update culture dimensions",
            "Edit culture inputs",
            "Delete a culture",
            "Exit",
        ];

        let selection = Select::new()
            .with_prompt("Main menu")
            .items(items)
            .default(0)
            .interact()?;

        match selection {
            0 => add_cultures(&mut session)?,
            1 => render::print_listing(session.store.list(), &session.store.summary()),
            2 => update_culture(&mut session)?,
            3 => {
                if let Some(id) = pick_culture(&session, "edit inputs of")? {
                    edit_inputs(&mut session, id)?;
                }
            }
            4 => delete_culture(&mut session)?,
            5 => {
                println!("Goodbye.");
                return Ok(());
            }
            _ => unreachable!(),
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Register cultures until the operator goes back to the main menu.
fn add_cultures(session: &mut Session) -> CliResult<()> {
    loop {
        println!();
        println!("{}", "Add a culture".cyan().bold());

        let mut labels: Vec<&str> = CropType::ALL.iter().map(|c| c.label()).collect();
        labels.push("Back");
        let choice = Select::new()
            .with_prompt("Crop type")
            .items(&labels)
            .default(0)
            .interact()?;
        let Some(&crop) = CropType::ALL.get(choice) else {
            return Ok(());
        };

        let Some(dimensions) = prompt_dimensions(crop.shape_kind())? else {
            return Ok(());
        };

        let id = match session.store.create(crop, dimensions) {
            Ok(culture) => culture.id,
            Err(e) => {
                report(&e);
                continue;
            }
        };

        if Confirm::new()
            .with_prompt("Add an initial input for this culture?")
            .default(false)
            .interact()?
        {
            loop {
                add_input(session, id)?;
                if !Confirm::new()
                    .with_prompt("Add another input?")
                    .default(false)
                    .interact()?
                {
                    break;
                }
            }
        }

        session.persist();

        loop {
            show(session, id);
            let next = Select::new()
                .with_prompt("What next?")
                .items(&[
                    "Add another culture",
                    "Edit inputs of this culture",
                    "Back to main menu",
                ])
                .default(0)
                .interact()?;

            match next {
                0 => break,
                1 => edit_inputs(session, id)?,
                _ => return Ok(()),
            }
        }
    }
}

/// Prompt every dimension of a shape. A blank entry cancels.
fn prompt_dimensions(shape: ShapeKind) -> CliResult<Option<Dimensions>> {
    println!("Leave a value blank to cancel.");
    let dimensions = match shape {
        ShapeKind::Rectangle => {
            let Some(length) = prompt_value("length", "Length (m)")? else {
                return Ok(None);
            };
            let Some(width) = prompt_value("width", "Width (m)")? else {
                return Ok(None);
            };
            Dimensions::rectangle(length, width)
        }
        ShapeKind::Circle => {
            let Some(radius) = prompt_value("radius", "Radius (m)")? else {
                return Ok(None);
            };
            Dimensions::circle(radius)
        }
    };
    Ok(Some(dimensions))
}

/// Prompt one dimension. Blank returns `None`.
fn prompt_value(field: &str, prompt: &str) -> CliResult<Option<f64>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), String> {
            if s.trim().is_empty() {
                return Ok(());
            }
            parse_dimension(field, s).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_dimension(field, &raw)?))
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Change the dimensions of an existing culture.
fn update_culture(session: &mut Session) -> CliResult<()> {
    let Some(id) = pick_culture(session, "update")? else {
        return Ok(());
    };
    let culture = session.store.get(id)?;
    let dimensions = culture.dimensions;

    println!(
        "Updating culture {} ({}). Leave a value blank to keep it.",
        id,
        culture.crop_type.label()
    );

    let mut update = DimensionUpdate::new();
    for field in culture.shape().fields() {
        let current = dimensions.get(field).unwrap_or_default();
        let raw: String = Input::new()
            .with_prompt(format!("New {} (current: {}m)", field, current))
            .allow_empty(true)
            .validate_with(|s: &String| -> Result<(), String> {
                if s.trim().is_empty() {
                    return Ok(());
                }
                parse_dimension(field, s).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        if !raw.trim().is_empty() {
            update.set(field, parse_dimension(field, &raw)?)?;
        }
    }

    if update.is_empty() {
        println!("Nothing changed.");
        return Ok(());
    }

    match session.store.update_dimensions(id, &update) {
        Ok(_) => {
            session.persist();
            println!("{}", "Culture updated.".green().bold());
            show(session, id);
        }
        Err(e) => report(&e),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input editing sub-menu for one culture.
fn edit_inputs(session: &mut Session, id: u64) -> CliResult<()> {
    loop {
        let culture = session.store.get(id)?;
        println!();
        println!("{}", format!("Inputs of culture {}", id).cyan().bold());
        if culture.inputs.is_empty() {
            println!("No inputs registered.");
        } else {
            print!("{}", render::input_lines(culture));
        }

        let selection = Select::new()
            .with_prompt("Inputs")
            .items(&["Add an input", "Remove an input", "Change an input's rate", "Done"])
            .default(0)
            .interact()?;

        match selection {
            0 => add_input(session, id)?,
            1 => remove_input(session, id)?,
            2 => change_rate(session, id)?,
            _ => return Ok(()),
        }
    }
}

/// Prompt a name and rate and attach the input.
fn add_input(session: &mut Session, id: u64) -> CliResult<()> {
    let name: String = Input::new()
        .with_prompt("Input name")
        .validate_with(|s: &String| -> Result<(), String> {
            if s.trim().is_empty() {
                Err(FarmTechError::EmptyInputName.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    let rate = prompt_rate(&format!("Quantity of '{}' per m²", name.trim()))?;

    match session.store.add_input(id, &name, rate) {
        Ok(input) => {
            println!(
                "{} '{}' ({} units required)",
                "Added".green().bold(),
                input.name,
                input.total_required
            );
            session.persist();
        }
        Err(e) => report(&e),
    }
    Ok(())
}

/// Remove an input by its displayed position.
fn remove_input(session: &mut Session, id: u64) -> CliResult<()> {
    if session.store.get(id)?.inputs.is_empty() {
        println!("There are no inputs to remove.");
        return Ok(());
    }

    loop {
        let position = prompt_position("Number of the input to remove")?;
        match session.store.remove_input(id, position) {
            Ok(removed) => {
                println!("{} '{}'", "Removed".green().bold(), removed.name);
                session.persist();
                return Ok(());
            }
            Err(e @ FarmTechError::IndexOutOfRange { .. }) => report(&e),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Change the rate of an input by its displayed position.
fn change_rate(session: &mut Session, id: u64) -> CliResult<()> {
    if session.store.get(id)?.inputs.is_empty() {
        println!("There are no inputs to change.");
        return Ok(());
    }

    loop {
        let position = prompt_position("Number of the input to change")?;
        if let Some(input) = session.store.get(id)?.input(position) {
            println!("Current rate of '{}': {} per m²", input.name, input.rate_per_area);
        }
        let rate = prompt_rate("New quantity per m²")?;
        match session.store.update_input_rate(id, position, rate) {
            Ok(input) => {
                println!(
                    "{} '{}' now needs {} units",
                    "Updated".green().bold(),
                    input.name,
                    input.total_required
                );
                session.persist();
                return Ok(());
            }
            Err(e @ FarmTechError::IndexOutOfRange { .. }) => report(&e),
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_rate(prompt: &str) -> CliResult<f64> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|s: &String| -> Result<(), String> {
            parse_rate(s).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_rate(&raw)?)
}

fn prompt_position(prompt: &str) -> CliResult<usize> {
    let position: usize = Input::new().with_prompt(prompt).interact_text()?;
    Ok(position)
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Delete a culture after confirmation.
fn delete_culture(session: &mut Session) -> CliResult<()> {
    let Some(id) = pick_culture(session, "delete")? else {
        return Ok(());
    };

    if !Confirm::new()
        .with_prompt(format!("Delete culture {}?", id))
        .default(false)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    match session.store.delete(id) {
        Ok(_) => {
            session.persist();
            println!("{}", "Culture deleted.".green().bold());
        }
        Err(e) => report(&e),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// List cultures and ask for an id. `0` or blank goes back.
fn pick_culture(session: &Session, action: &str) -> CliResult<Option<u64>> {
    if session.store.is_empty() {
        println!("No cultures to {}.", action);
        return Ok(None);
    }

    println!();
    for culture in session.store.list() {
        println!("  {}", render::culture_row(culture));
    }

    loop {
        let raw: String = Input::new()
            .with_prompt(format!("ID of the culture to {} (blank or 0 to go back)", action))
            .allow_empty(true)
            .interact_text()?;
        let raw = raw.trim();
        if raw.is_empty() || raw == "0" {
            return Ok(None);
        }

        let Ok(id) = raw.parse::<u64>() else {
            println!("{} '{}' is not a valid id.", "Error:".red().bold(), raw);
            continue;
        };
        match session.store.get(id) {
            Ok(_) => return Ok(Some(id)),
            Err(e) => report(&e),
        }
    }
}

fn show(session: &Session, id: u64) {
    if let Some(culture) = session.store.find(id) {
        println!();
        println!("{}", render::culture_details(culture));
    }
}

fn report(error: &FarmTechError) {
    println!("{} {}", "Error:".red().bold(), error);
}
