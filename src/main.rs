use anyhow::Result;
use recipe_loader::{
    cli::{Cli, Commands},
    config::RemoteConfig,
    dataset::{self, load_dataset},
    loader::{load_recipes, LoadReport},
    schema::table_names,
    store::{RestStore, SqliteStore},
    ui::{ConsoleUi, Phase, Ui},
};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Load {
            input,
            output_db,
            fresh,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            ui.set_phase(Phase::Parsing);
            let book = load_dataset(&input)?;

            ui.set_phase(Phase::Loading);
            let mut store = SqliteStore::open(&output_db, fresh)?;
            let report = load_recipes(&mut store, &book.recipes, &mut ui);

            ui.set_phase(Phase::Complete);
            print_summary(&report, start.elapsed());
        }

        Commands::Push {
            input,
            url,
            key,
            retries,
        } => {
            // Config problems abort before anything is parsed or written
            let config = RemoteConfig::resolve(url, key, retries)?;

            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            ui.set_phase(Phase::Parsing);
            let book = load_dataset(&input)?;

            ui.set_phase(Phase::Loading);
            let mut store = RestStore::new(&config)?;
            let report = load_recipes(&mut store, &book.recipes, &mut ui);

            ui.set_phase(Phase::Complete);
            print_summary(&report, start.elapsed());
        }

        Commands::Validate { input } => {
            let book = load_dataset(&input)?;
            let issues = dataset::validate(&book);

            if issues.is_empty() {
                println!("{} recipes, no issues found", book.recipes.len());
            } else {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                anyhow::bail!("{} issues found in {:?}", issues.len(), input);
            }
        }

        Commands::ListTables => {
            println!("Tables in write order:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

/// Completion message; partial failure is reported but does not change the
/// exit code.
fn print_summary(report: &LoadReport, elapsed: Duration) {
    println!(
        "\nLoaded {}/{} recipes ({} ingredient rows, {} instruction rows) in {:.1}s",
        report.loaded,
        report.attempted,
        report.ingredient_rows,
        report.instruction_rows,
        elapsed.as_secs_f64()
    );

    if !report.is_clean() {
        println!(
            "{} recipes failed; see diagnostics above.",
            report.failures.len()
        );
    }
}
