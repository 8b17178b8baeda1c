use crate::cli::CatalogArgs;
use crate::infra::{load_service, resolve_catalog_paths};
use clap::Args;
use recalc::config::AppConfig;
use recalc::error::AppError;
use recalc::scholarship::{
    Catalog, Eligibility, Level, Modality, ProgramType, Quote, ScholarshipService, Selection,
};

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Business line (undergraduate, health-sciences, graduate, high-school)
    #[arg(long)]
    pub(crate) level: Level,
    /// Delivery format (in-person, hybrid, online)
    #[arg(long)]
    pub(crate) modality: Modality,
    /// Study plan length in periods
    #[arg(long)]
    pub(crate) plan: u32,
    /// Campus name; required for in-person and hybrid campus-bound lines
    #[arg(long)]
    pub(crate) campus: Option<String>,
    /// Academic average on the 0-10 scale; a decimal comma is accepted
    #[arg(long)]
    pub(crate) average: String,
    /// Price as a returning student
    #[arg(long)]
    pub(crate) returning: bool,
    /// Optional charge codes to add (returning students only)
    #[arg(long, num_args = 1..)]
    pub(crate) extras: Vec<String>,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Business line to list modalities and campuses for
    #[arg(long)]
    pub(crate) level: Option<Level>,
    /// Delivery format to list plans for
    #[arg(long)]
    pub(crate) modality: Option<Modality>,
    /// Campus whose optional charges should be listed
    #[arg(long)]
    pub(crate) campus: Option<String>,
}

pub(crate) fn run_calculate(args: CalculateArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let service = load_cli_service(catalog_args)?;
    let selection = build_selection(&args, service.catalog());

    if !args.extras.is_empty() && !selection.extras_enabled {
        println!("Extras ignored: the selected campus lists no optional charges");
    }

    let quote = match service.calculate(&selection) {
        Ok(quote) => quote,
        Err(err) => {
            println!("Calculation rejected ({}): {}", err.kind(), err);
            return Ok(());
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&quote) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Quote payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_quote(service.catalog(), &selection, &quote);
    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let service = load_cli_service(catalog_args)?;
    let options = service.options(args.level, args.modality, args.campus.as_deref());

    if let Some(version) = service.catalog().version() {
        println!("Reference data version {version}");
    }

    println!("Levels:");
    for level in &options.levels {
        println!("  - {} ({})", level.label(), level.as_str());
    }

    if let Some(level) = args.level {
        println!("Modalities for {}:", level.label());
        for modality in &options.modalities {
            println!("  - {} ({})", modality.label(), modality.as_str());
        }
    }

    if let (Some(level), Some(modality)) = (args.level, args.modality) {
        let plans: Vec<String> = options.plans.iter().map(u32::to_string).collect();
        println!(
            "Plans for {} / {}: {}",
            level.label(),
            modality.label(),
            if plans.is_empty() {
                "none".to_string()
            } else {
                plans.join(", ")
            }
        );

        if options.campus_required {
            println!("Campuses:");
            for campus in &options.campuses {
                println!("  - {campus}");
            }
        } else {
            println!("No campus selection required");
        }

        match &options.extras {
            Some(categories) => {
                println!("Optional charges (returning students):");
                for (category, items) in categories {
                    println!("  {category}:");
                    for item in items {
                        println!("    - {} {} ({:.2})", item.code, item.description, item.amount);
                    }
                }
            }
            None => println!("No optional charges for this selection"),
        }
    }

    Ok(())
}

fn load_cli_service(catalog_args: CatalogArgs) -> Result<std::sync::Arc<ScholarshipService>, AppError> {
    let config = AppConfig::load()?;
    let paths = resolve_catalog_paths(&config.catalog, catalog_args);
    load_service(&paths)
}

/// Apply the arguments through the same setters the form uses.
pub(crate) fn build_selection(args: &CalculateArgs, catalog: &Catalog) -> Selection {
    let program_type = if args.returning {
        ProgramType::Returning
    } else {
        ProgramType::NewEntry
    };

    let mut selection = Selection::new(program_type);
    selection.set_level(args.level);
    selection.set_modality(args.modality);
    selection.set_plan(args.plan);
    if let Some(campus) = &args.campus {
        selection.set_campus(campus.as_str());
    }
    selection.set_average(args.average.as_str());

    if !args.extras.is_empty() && selection.toggle_extras(catalog) {
        for code in &args.extras {
            selection.toggle_extra_code(code);
        }
    }

    selection
}

fn render_quote(catalog: &Catalog, selection: &Selection, quote: &Quote) {
    println!("Scholarship quote");
    if let (Some(level), Some(modality), Some(plan)) =
        (selection.level, selection.modality, selection.plan)
    {
        println!(
            "- {} | {} | {} periods | {}",
            level.label(),
            modality.label(),
            plan,
            selection.program_type.label()
        );

        let eligibility =
            Eligibility::resolve(catalog, level, modality, selection.campus.as_deref());
        match (eligibility.campus_required, eligibility.campus, eligibility.tier) {
            (true, Some(campus), Some(tier)) => println!("- Campus {campus} (tier {tier})"),
            (true, Some(campus), None) => println!("- Campus {campus}"),
            _ => {}
        }
    }

    println!("- List price: {:.2}", quote.list_price);
    if quote.extras_total > 0.0 {
        println!("- Extras: {:.2}", quote.extras_total);
    }
    println!("- Discount applied: {}%", quote.discount_percent_applied);
    println!("- Final monthly amount: {:.2}", quote.final_monthly_amount);
}
