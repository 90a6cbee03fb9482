//! datagen: deterministic demo-dataset generator.
//!
//! Usage:
//!   datagen --customers 1000000 --use-case both --output-dir data
//!   datagen --customers 1000 --seed 7 --compression gzip --overwrite
//!   datagen --env-file demo.env --verbose

use datagen_core::{CliOverrides, GenError, GenResult, GeneratorConfig, RunReport};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
datagen - deterministic demo-dataset generator

OPTIONS:
    --customers <N>      customer count (default 1000000)
    --seed <N>           master random seed (default 42)
    --use-case <NAME>    customer360 | fraud-detection | both (default both)
    --output-dir <DIR>   output root directory (default ./data)
    --compression <C>    snappy | gzip | lz4 (default snappy)
    --batch-size <N>     rows per output file (default 100000)
    --env-file <FILE>    KEY=VALUE file layered under CLI flags
    --overwrite          replace existing dataset directories
    --verbose            debug-level logging
    -h, --help           print this help
";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match parse_args(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: CliOverrides) -> GenResult<()> {
    let config = GeneratorConfig::resolve(&cli)?;
    init_logging(config.verbose);

    println!("datagen");
    println!("  customers:    {}", config.customers);
    println!("  seed:         {}", config.seed);
    println!("  use case:     {}", config.use_case.as_str());
    println!("  output dir:   {}", config.output_dir.display());
    println!("  compression:  {}", config.compression.as_str());
    println!("  batch size:   {}", config.batch_size);
    println!();

    let reports = datagen_core::run(&config)?;
    for report in &reports {
        print_summary(report);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn print_summary(report: &RunReport) {
    println!("=== {} ===", report.use_case);
    for table in &report.tables {
        println!(
            "  {:<14} {:>12} rows in {} file(s)",
            table.table, table.rows, table.batches
        );
    }
    if !report.scenarios.is_empty() {
        println!("  fraud scenarios:");
        for scenario in &report.scenarios {
            println!(
                "    {:<20} {:>6} participants, {:>6} transactions",
                scenario.scenario,
                scenario.participants(),
                scenario.transactions
            );
        }
    }
    println!();
}

fn parse_args(args: &[String]) -> GenResult<CliOverrides> {
    let mut cli = CliOverrides::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--customers" => cli.customers = Some(parse_value(&mut iter, flag)?),
            "--seed" => cli.seed = Some(parse_value(&mut iter, flag)?),
            "--batch-size" => cli.batch_size = Some(parse_value(&mut iter, flag)?),
            "--output-dir" => cli.output_dir = Some(next_value(&mut iter, flag)?),
            "--compression" => cli.compression = Some(next_value(&mut iter, flag)?),
            "--use-case" => cli.use_case = Some(next_value(&mut iter, flag)?),
            "--env-file" => cli.env_file = Some(PathBuf::from(next_value(&mut iter, flag)?)),
            "--overwrite" => cli.overwrite = true,
            "--verbose" => cli.verbose = true,
            other => {
                return Err(GenError::Config(format!(
                    "unknown flag '{other}' (see --help)"
                )))
            }
        }
    }
    Ok(cli)
}

fn next_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> GenResult<String> {
    iter.next()
        .map(|v| v.to_string())
        .ok_or_else(|| GenError::Config(format!("flag '{flag}' requires a value")))
}

fn parse_value<T: std::str::FromStr>(
    iter: &mut std::slice::Iter<'_, String>,
    flag: &str,
) -> GenResult<T> {
    let raw = next_value(iter, flag)?;
    raw.parse()
        .map_err(|_| GenError::Config(format!("flag '{flag}': invalid value '{raw}'")))
}
