use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use redlist_tracker::stats::{self, Summary};
use redlist_tracker::{Client, Config, LookupError, SpeciesRecord, storage};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "redlist",
    version,
    about = "Look up IUCN Red List conservation status, population trend & habitat"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a single species and print the result.
    Lookup(LookupArgs),
    /// Prompt for species names until `:quit` or end of input (the default).
    Prompt,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// API token. Overrides IUCN_API_KEY from the environment or .env file.
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Save the session's records to a file (format inferred by --format or extension).
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum, global = true)]
    format: Option<OutFormat>,
    /// Print status and trend distribution when done.
    #[arg(long, default_value_t = false, global = true)]
    stats: bool,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Species name (e.g., "Panthera leo")
    species: String,
    /// Print the record as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Configuration is checked before any input is read.
    let config = Config::load_with_key(cli.common.api_key.clone())?;
    let client = Client::new(&config)?;

    let records = match cli.cmd {
        Some(Command::Lookup(args)) => cmd_lookup(&client, args)?,
        Some(Command::Prompt) | None => cmd_prompt(&client)?,
    };

    finish(&cli.common, &records)
}

fn cmd_lookup(client: &Client, args: LookupArgs) -> Result<Vec<SpeciesRecord>> {
    let record = client.lookup(&args.species)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(vec![record])
}

fn cmd_prompt(client: &Client) -> Result<Vec<SpeciesRecord>> {
    let stdin = io::stdin();
    let mut records = Vec::new();
    let mut line = String::new();

    println!("Enter a species name (e.g., Panthera leo). :stats for a summary, :quit to exit.");
    loop {
        print!("species> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match line.trim() {
            ":quit" | ":q" => break,
            ":stats" => print_summary(&stats::summarize(&records)),
            input => match client.lookup(input) {
                Ok(record) => {
                    print_record(&record);
                    records.push(record);
                }
                Err(e) => print_error(&e),
            },
        }
    }
    Ok(records)
}

fn finish(common: &CommonArgs, records: &[SpeciesRecord]) -> Result<()> {
    if let Some(path) = common.out.as_ref() {
        let fmt = match common.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(records, path)?,
            "json" => storage::save_json(records, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} records to {}", records.len(), path.display());
    }

    if common.stats {
        print_summary(&stats::summarize(records));
    }
    Ok(())
}

fn or_na(s: Option<&str>) -> &str {
    match s {
        Some(v) if !v.trim().is_empty() => v,
        _ => "Not available",
    }
}

fn print_record(r: &SpeciesRecord) {
    println!("Species:             {}", r.name);
    println!("Scientific name:     {}", or_na(r.scientific_name.as_deref()));
    println!("Common name:         {}", or_na(r.common_name.as_deref()));
    println!("Conservation status: {}", r.conservation_status);
    println!("Population trend:    {}", r.population_trend);
    println!("Habitat:             {}", or_na(Some(r.habitat.as_str())));
}

fn print_error(e: &LookupError) {
    match e {
        LookupError::InvalidInput(_) => println!("Please enter a species name."),
        _ => println!("Species not found or error fetching data: {}", e),
    }
}

fn print_summary(s: &Summary) {
    println!("{} species looked up", s.total);
    for (status, n) in &s.by_status {
        println!("  status  {:<26} {}", status.to_string(), n);
    }
    for (trend, n) in &s.by_trend {
        println!("  trend   {:<26} {}", trend.label(), n);
    }
}
