use anyhow::Result;

use newscurator_core::{AppConfig, CurationPipeline, CurationReport, UserSelection};

pub async fn run(config: &AppConfig, selection: UserSelection, json: bool) -> Result<()> {
    let pipeline = CurationPipeline::from_config(config)?;

    if !json {
        println!("Fetching and analyzing news for \"{}\"...\n", selection.topic.trim());
    }

    let report = pipeline.run(selection).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &CurationReport) {
    if report.items.is_empty() {
        println!("No articles found matching your filters.");
    }

    for item in &report.items {
        println!("{}", item.title);
        println!("  Summary: {}", item.summary);
        println!("  Sentiment: {}", item.sentiment);
        println!("  Source: {}", item.source_name);
        println!("  Read Full Article: {}", item.url);
        println!();
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} articles (summary failed):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} - {}", skipped.title, skipped.reason);
        }
        println!();
    }

    println!(
        "{} of {} fetched articles curated.",
        report.items.len(),
        report.fetched
    );
}
