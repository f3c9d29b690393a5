use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_aggregation::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find the worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The spreadsheet {path} is empty"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of the CSV file"))]
    CsvHeader { source: csv::Error },
    #[snafu(display("Error parsing row {row} of the CSV file"))]
    CsvLineParse { source: csv::Error, row: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Cannot find the column {column:?} for the field {field:?} in the header"))]
    MissingColumn { field: Field, column: String },
    #[snafu(display("Input type {provider} is not supported (use csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("No survey source: pass --input or list surveySources in the configuration"))]
    MissingInput {},
    #[snafu(display("Cannot find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

fn tally_to_json(tally: &Tally, label_key: &str, count_key: &str) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (label, count) in tally.iter() {
        let mut entry: JSMap<String, JSValue> = JSMap::new();
        entry.insert(label_key.to_string(), json!(label));
        entry.insert(count_key.to_string(), json!(count));
        l.push(JSValue::Object(entry));
    }
    l
}

fn feedback_to_json(records: &[Record]) -> Vec<JSValue> {
    records
        .iter()
        .map(|r| {
            json!({
                "name": r.get(Field::Identity),
                "satisfaction": r.get(Field::Satisfaction),
                "reason": r.get(Field::Reason),
                "learnings": r.get(Field::Learnings),
                "specificRoleInterest": r.get(Field::SpecificRoleInterest),
                "tenure": r.get(Field::Tenure),
                "sectorChangeInterest": r.get(Field::InterestInChange),
            })
        })
        .collect()
}

fn build_summary_js(config: &SurveyConfig, filters: &Filters, views: &DashboardViews) -> JSValue {
    json!({
        "config": {
            "dashboard": config.output_settings.dashboard_name,
            "employeeFilter": filters.employee.to_string(),
            "satisfactionFilter": filters.satisfaction.to_string(),
        },
        "results": {
            "respondents": views.feedback.len(),
            "employees": views.employees,
            "satisfactionLevels": views.satisfaction_levels,
            "satisfaction": tally_to_json(&views.satisfaction, "satisfaction", "count"),
            "sectorChangeInterest": tally_to_json(&views.interest_in_change, "name", "value"),
            "preferredSectors": tally_to_json(&views.preferred_sectors, "sector", "count"),
            "feedback": feedback_to_json(&views.feedback),
        }
    })
}

// Relative paths are resolved against the directory of the configuration file.
fn resolve_path(root: Option<&Path>, file_path: &str) -> String {
    match root {
        Some(root_p) => {
            let p: PathBuf = [root_p, Path::new(file_path)].iter().collect();
            p.as_path().display().to_string()
        }
        None => file_path.to_string(),
    }
}

fn read_survey_data(
    root: Option<&Path>,
    cfs: &FileSource,
    columns: &ColumnMapping,
) -> SurveyResult<Vec<Record>> {
    let path = resolve_path(root, &cfs.file_path);
    info!("Attempting to read survey file {:?}", path);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_survey(&path, columns),
        "xlsx" => io_xlsx::read_xlsx_survey(&path, cfs, columns),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

// The configuration from the file, if any, with the command line options applied on top.
fn assemble_config(args: &Args) -> SurveyResult<(SurveyConfig, Option<PathBuf>)> {
    let (mut config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?;
            (config, Some(root_p.to_path_buf()))
        }
        None => {
            let input = args.input.as_deref().context(MissingInputSnafu {})?;
            let config = SurveyConfig {
                output_settings: OutputSettings {
                    dashboard_name: io_common::simplify_file_name(input),
                    output_directory: None,
                },
                survey_sources: Vec::new(),
                columns: None,
                filters: None,
            };
            (config, None)
        }
    };

    if let Some(input) = &args.input {
        // The input given on the command line is relative to the working directory.
        let input = std::env::current_dir()
            .map(|d| resolve_path(Some(d.as_path()), input))
            .unwrap_or_else(|_| input.clone());
        config.survey_sources = vec![FileSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input,
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }];
    }

    let mut filters = config.filters.clone().unwrap_or_default();
    if let Some(employee) = &args.employee {
        filters.employee = Some(employee.clone());
    }
    if let Some(satisfaction) = &args.satisfaction {
        filters.satisfaction = Some(satisfaction.clone());
    }
    config.filters = Some(filters);

    Ok((config, root))
}

fn get_filters(config: &SurveyConfig) -> Filters {
    let settings = config.filters.clone().unwrap_or_default();
    Filters::new(
        settings.employee.as_deref().unwrap_or(ALL_SENTINEL),
        settings.satisfaction.as_deref().unwrap_or(ALL_SENTINEL),
    )
}

fn write_summary(
    out: Option<&str>,
    config: &SurveyConfig,
    root: Option<&Path>,
    pretty_js: &str,
) -> SurveyResult<()> {
    let out_path: Option<String> = match out {
        Some("stdout") => None,
        Some(p) => Some(p.to_string()),
        None => config
            .output_settings
            .output_directory
            .as_deref()
            .map(|dir| {
                let p: PathBuf = [resolve_path(root, dir), "summary.json".to_string()]
                    .iter()
                    .collect();
                p.as_path().display().to_string()
            }),
    };
    match out_path {
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(&path, pretty_js).context(WritingSummarySnafu { path })
        }
        None => {
            println!("{}", pretty_js);
            Ok(())
        }
    }
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Summary matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_dashboard(args: &Args) -> SurveyResult<()> {
    let (config, root) = assemble_config(args)?;
    info!("config: {:?}", config);

    if config.survey_sources.is_empty() {
        return MissingInputSnafu {}.fail();
    }

    let columns = config.columns.clone().unwrap_or_default();
    let mut table: Vec<Record> = Vec::new();
    for cfs in config.survey_sources.iter() {
        let mut file_data = read_survey_data(root.as_deref(), cfs, &columns)?;
        table.append(&mut file_data);
    }
    info!("Read {} records", table.len());

    let filters = get_filters(&config);
    let views = build_views(&table, &filters);

    // Assemble the final json
    let result_js = build_summary_js(&config, &filters, &views);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    write_summary(args.out.as_deref(), &config, root.as_deref(), &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}
