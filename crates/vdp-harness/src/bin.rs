/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use std::process::ExitCode;

use vdp_client::Transport;
use vdp_harness::cli::parse_cli;
use vdp_harness::scenario;
use vdp_utils::logging;
use vdp_utils::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = parse_cli();

    let mut settings = match Settings::new(cli.config.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut settings);

    if let Err(e) = logging::init(&settings.log.level, &settings.log.format) {
        eprintln!("❌ Could not install the logger: {}", e);
        return ExitCode::FAILURE;
    }

    let transport = Transport::from(cli.transport);
    println!("🧪 Pipeline backend conformance checks over {}", transport);
    println!();

    let report = match scenario::run(settings, transport).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Run aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for failure in &report.failures {
        println!("❌ {} › {}", failure.group, failure.name);
    }
    let summary = report.summary;
    println!(
        "📊 Results: {} passed, {} failed ({:.2}% of {} checks)",
        summary.passed,
        summary.failed,
        summary.rate() * 100.0,
        summary.total()
    );

    if summary.rate() == 1.0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
