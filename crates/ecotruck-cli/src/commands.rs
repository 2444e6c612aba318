//! Command handlers

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use ecotruck_app::app::{
    CalculationFilter, CalculationService, Period, QueryService, SubmitOptions,
};
use ecotruck_app::config::Config;
use ecotruck_app::export::{export_calculations, generate_calculation_report};
use ecotruck_app::repository::open_calculation_repo;
use ecotruck_domain::model::default_additional_gains;
use ecotruck_domain::repository::CalculationRepository;
use ecotruck_domain::service::{generate_comparison_report, Comparison};
use ecotruck_infra::scenario_loader::{load_additional_gains, load_form};
use ecotruck_types::{Error, ExportFormat, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_gains, output_record, output_records, output_result, output_stats};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref store_dir) = cli.store_dir {
        config.store_dir = Some(store_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(store = ?config.store_dir, %output_format, "configuration loaded");

    match &cli.command {
        Commands::Calculate {
            scenario,
            dry_run,
            session,
            user,
            gains,
        } => cmd_calculate(
            &config,
            output_format,
            scenario,
            *dry_run,
            session.clone(),
            user.clone(),
            gains.as_deref(),
        ),

        Commands::List {
            search,
            period,
            page,
            per_page,
        } => {
            let filter = CalculationFilter {
                search: search.clone(),
                period: *period,
                page: *page,
                per_page: per_page.unwrap_or(config.page_size),
            };
            cmd_list(&config, output_format, &filter)
        }

        Commands::Show { id } => cmd_show(&config, output_format, id),

        Commands::Delete { id } => cmd_delete(&config, id),

        Commands::Compare { ids, differences } => {
            cmd_compare(&config, output_format, ids, *differences)
        }

        Commands::Stats => cmd_stats(&config, output_format),

        Commands::Export {
            output,
            to,
            search,
            period,
        } => cmd_export(&config, output.clone(), *to, search.clone(), *period),

        Commands::Report { id, output } => cmd_report(&config, id, output.as_deref()),

        Commands::Last { session } => cmd_last(&config, output_format, session),

        Commands::Gains { template } => cmd_gains(output_format, template.as_deref()),

        Commands::Config {
            show,
            set_output,
            set_page_size,
            set_store_dir,
            set_fuel_savings,
            set_cpk_improvement,
            set_carcass_savings,
            reset,
        } => cmd_config(
            *show,
            *set_output,
            *set_page_size,
            set_store_dir.clone(),
            *set_fuel_savings,
            *set_cpk_improvement,
            *set_carcass_savings,
            *reset,
        ),
    }
}

fn cmd_calculate(
    config: &Config,
    output_format: OutputFormat,
    scenario: &Path,
    dry_run: bool,
    session: Option<String>,
    user: Option<String>,
    gains: Option<&Path>,
) -> Result<()> {
    let form = load_form(scenario)?;
    let repo = open_calculation_repo(config)?;
    let service = CalculationService::new(&repo, config.percentage_defaults);

    if dry_run {
        let result = service.preview(&form)?;
        let percentages = form.input.percentages(&config.percentage_defaults);
        return output_result(output_format, &result, &percentages);
    }

    let mut options = SubmitOptions::new();
    if let Some(session) = session {
        options = options.with_session(session);
    }
    if let Some(user) = user {
        options = options.with_user(user);
    }
    if let Some(path) = gains {
        options = options.with_additional_gains(load_additional_gains(path)?);
    }

    let record = service.submit(form, options)?;
    if output_format == OutputFormat::Json {
        return output_record(output_format, &record, "");
    }

    output_result(output_format, &record.result, &record.percentages)?;
    println!();
    println!("Saved as {} ({})", record.short_id(), record.id);
    Ok(())
}

fn cmd_list(config: &Config, output_format: OutputFormat, filter: &CalculationFilter) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let page = QueryService::new(&repo).list(filter, Utc::now())?;
    output_records(output_format, &page)
}

fn cmd_show(config: &Config, output_format: OutputFormat, id: &str) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let queries = QueryService::new(&repo);
    let record = queries.get(&queries.resolve_id(id)?)?;
    output_record(output_format, &record, &generate_calculation_report(&record))
}

fn cmd_delete(config: &Config, id: &str) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let id = QueryService::new(&repo).resolve_id(id)?;

    if repo.delete(&id)? {
        println!("Deleted calculation {}", id);
        Ok(())
    } else {
        Err(Error::NotFound(id.to_string()))
    }
}

fn cmd_compare(
    config: &Config,
    output_format: OutputFormat,
    ids: &[String],
    differences_only: bool,
) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let queries = QueryService::new(&repo);

    let ids = ids
        .iter()
        .map(|id| queries.resolve_id(id))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut comparison = queries.compare(&ids)?;
    if differences_only {
        comparison = Comparison {
            rows: comparison.differing_rows().cloned().collect(),
            calculations: comparison.calculations,
        };
    }

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", generate_comparison_report(&comparison));
    }
    Ok(())
}

fn cmd_stats(config: &Config, output_format: OutputFormat) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let stats = QueryService::new(&repo).stats(Utc::now())?;
    output_stats(output_format, &stats)
}

fn cmd_export(
    config: &Config,
    output: Option<PathBuf>,
    format: ExportFormat,
    search: Option<String>,
    period: Period,
) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let queries = QueryService::new(&repo);

    let now = Utc::now();
    let filter = CalculationFilter {
        search,
        period,
        page: 1,
        per_page: usize::MAX,
    };
    let records = queries.list(&filter, now)?.items;

    let output_path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "simulacoes-{}.{}",
            now.format("%Y-%m-%d"),
            format.extension()
        ))
    });

    export_calculations(&records, format, &output_path)?;
    println!(
        "Exported {} calculations to: {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

fn cmd_report(config: &Config, id: &str, output: Option<&Path>) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    let queries = QueryService::new(&repo);
    let record = queries.get(&queries.resolve_id(id)?)?;
    let report = generate_calculation_report(&record);

    match output {
        Some(path) => {
            std::fs::write(path, &report)?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}

fn cmd_last(config: &Config, output_format: OutputFormat, session: &str) -> Result<()> {
    let repo = open_calculation_repo(config)?;
    match QueryService::new(&repo).last_for_session(session)? {
        Some(record) => {
            output_record(output_format, &record, &generate_calculation_report(&record))
        }
        None => Err(Error::NotFound(format!(
            "no calculation for session {}",
            session
        ))),
    }
}

fn cmd_gains(output_format: OutputFormat, template: Option<&Path>) -> Result<()> {
    let gains = default_additional_gains();

    if let Some(path) = template {
        std::fs::write(path, serde_json::to_string_pretty(&gains)?)?;
        println!("Template written to: {}", path.display());
        return Ok(());
    }

    output_gains(output_format, &gains)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_page_size: Option<usize>,
    set_store_dir: Option<PathBuf>,
    set_fuel_savings: Option<f64>,
    set_cpk_improvement: Option<f64>,
    set_carcass_savings: Option<f64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(page_size) = set_page_size {
        config.page_size = page_size;
        modified = true;
    }

    if let Some(store_dir) = set_store_dir {
        config.store_dir = Some(store_dir);
        modified = true;
    }

    for (value, slot) in [
        (set_fuel_savings, &mut config.percentage_defaults.fuel_savings),
        (set_cpk_improvement, &mut config.percentage_defaults.cpk_improvement),
        (set_carcass_savings, &mut config.percentage_defaults.carcass_savings),
    ] {
        if let Some(pct) = value {
            *slot = pct;
            modified = true;
        }
    }

    if modified {
        config
            .validate()
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
