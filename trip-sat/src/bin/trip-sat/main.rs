mod result;

use std::io::Write;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;
use log::info;
use log::LevelFilter;
use result::CliError;
use result::CliResult;
use trip_sat::statistics::configure_statistic_logging;
use trip_sat::SolveOptions;
use trip_sat::Trip;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about
)]
struct Args {
    /// The trip to check, as a single JSON document. All fields are optional:
    ///  - 'start_date', 'end_date': strings,
    ///  - 'budget': a number,
    ///  - 'duration': the number of days,
    ///  - 'preferences': a list of tags such as "culture" or "budget",
    ///  - 'hotels': a list of objects with a 'price_per_night',
    ///  - 'attractions': a list of objects with a 'name' and a 'category'.
    #[clap(verbatim_doc_comment)]
    trip: String,

    /// The time budget for the solver, given in milliseconds.
    ///
    /// If the budget runs out, the result has status "timeout".
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// Asserts all constraints unconditionally instead of tracking them by name.
    ///
    /// An unsatisfiable result then carries an empty core.
    ///
    /// Possible values: bool
    #[arg(long = "no-explanations", verbatim_doc_comment)]
    no_explanations: bool,

    /// Enables log message output to stderr.
    ///
    /// The result document is always the only output on stdout.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics about the solve to stderr.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,

    /// Pretty-prints the result document.
    ///
    /// Possible values: bool
    #[arg(long = "pretty", verbatim_doc_comment)]
    pretty: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%%%trip-stat:", Some("%%%trip-stat-end"), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

/// Prints an error document in the same shape as an error result, but without an execution time
/// since nothing was solved.
fn print_error_document(error: &CliError) {
    let document = serde_json::json!({
        "status": "error",
        "error": error.to_string(),
    });
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{document}").and_then(|()| stdout.flush()) {
        error!("Could not write the error document: {e}");
    }
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            print_error_document(&e);
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CliResult<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.print()?;
            return Ok(());
        }
        Err(error) => return Err(CliError::invalid_arguments(&error)),
    };

    configure_logging(args.verbose, args.log_statistics);

    let trip = Trip::from_json(&args.trip)?;
    let options = SolveOptions {
        time_limit: args.time_limit.map(Duration::from_millis),
        explain_infeasibility: !args.no_explanations,
    };

    let result = trip_sat::solve(&trip, &options);
    info!(
        "Solved '{}' with status {} in {}ms",
        trip.label(),
        result.status(),
        result.execution_time()
    );

    let document = result.to_json(args.pretty).map_err(CliError::Render)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")?;
    stdout.flush()?;

    Ok(())
}
