//! Process command - extract employment records from a single statement.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cnis_core::cnis::CnisPipeline;
use cnis_core::models::statement::ExtractionResult;

use super::{load_config, open_source};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per employment record
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);

    pb.set_message("Loading statement...");
    let pipeline = CnisPipeline::new(config)?;
    let source = open_source(&args.input, pipeline.config())?;

    pb.set_message("Extracting employment records...");
    let result = pipeline.process_source(source.as_ref());
    pb.finish_and_clear();

    let output = format_result(&result, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if !result.success {
        anyhow::bail!(
            "Extraction failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "empregador",
        "cnpj",
        "data_inicio",
        "data_fim",
        "salario",
        "ultima_remuneracao",
    ])?;

    for record in &result.employment_records {
        wtr.write_record([
            record.employer.as_str(),
            record.tax_id.as_str(),
            record.start_date.as_deref().unwrap_or(""),
            record.end_date.as_deref().unwrap_or(""),
            &record.salary.map(|s| s.to_string()).unwrap_or_default(),
            record.last_remuneration.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    if !result.success {
        return format!("Error: {}\n", result.error.as_deref().unwrap_or("unknown error"));
    }

    let personal = &result.personal_data;
    let mut output = String::new();

    output.push_str(&format!(
        "Client: {}\n",
        personal.full_name.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("CPF: {}\n", personal.tax_id.as_deref().unwrap_or("-")));
    if let Some(birth) = &personal.birth_date {
        output.push_str(&format!("Birth date: {}\n", birth));
    }
    output.push('\n');

    output.push_str(&format!(
        "Employment records: {}\n",
        result.employment_records.len()
    ));

    for (i, record) in result.employment_records.iter().enumerate() {
        output.push_str(&format!("\n{}. {}\n", i + 1, record.employer));
        output.push_str(&format!("   CNPJ: {}\n", record.tax_id));
        output.push_str(&format!(
            "   Period: {} - {}\n",
            record.start_date.as_deref().unwrap_or("?"),
            record.end_date.as_deref().unwrap_or("current")
        ));
        if let Some(salary) = record.salary {
            match &record.last_remuneration {
                Some(period) => output.push_str(&format!("   Last salary: {} ({})\n", salary, period)),
                None => output.push_str(&format!("   Last salary: {}\n", salary)),
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnis_core::models::statement::{EmploymentRecord, PersonalData};

    fn sample() -> ExtractionResult {
        ExtractionResult::succeeded(
            PersonalData {
                tax_id: Some("123.456.789-00".to_string()),
                full_name: Some("Maria Da Silva".to_string()),
                birth_date: None,
            },
            vec![EmploymentRecord {
                employer: "ACME, LTDA".to_string(),
                tax_id: "12.345.678/9012-34".to_string(),
                start_date: Some("01/03/2010".to_string()),
                end_date: None,
                salary: None,
                last_remuneration: None,
            }],
            120,
        )
    }

    #[test]
    fn test_csv_quotes_and_blanks() {
        let csv = format_result(&sample(), OutputFormat::Csv, false).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("empregador,cnpj,data_inicio,data_fim,salario,ultima_remuneracao")
        );
        assert_eq!(
            lines.next(),
            Some("\"ACME, LTDA\",12.345.678/9012-34,01/03/2010,,,")
        );
    }

    #[test]
    fn test_text_summary() {
        let text = format_result(&sample(), OutputFormat::Text, false).unwrap();
        assert!(text.contains("Client: Maria Da Silva"));
        assert!(text.contains("Period: 01/03/2010 - current"));

        let failed = format_result(&ExtractionResult::failed("boom"), OutputFormat::Text, false).unwrap();
        assert_eq!(failed, "Error: boom\n");
    }
}
