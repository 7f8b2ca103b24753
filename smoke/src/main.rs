//! customer-smoke - run the customer API lifecycle against a live endpoint.

use clap::Parser;
use customer_smoke::{cli::Cli, logging, Mode, Result, ScenarioRunner, UreqTransport};

fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let mode = cli.mode();
    let runner = ScenarioRunner::new(&config, UreqTransport::new(config.timeout), mode);

    let stdout = std::io::stdout();
    let report = runner.run(&mut stdout.lock())?;

    if mode == Mode::Verify {
        println!("All {} steps passed for customer {}", report.steps.len(), report.captured.id);
    }
    Ok(())
}

fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
