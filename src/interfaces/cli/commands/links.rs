//! Shorten / resolve / info commands

use colored::Colorize;

use crate::errors::UrlShrinkError;
use crate::interfaces::cli::CliError;
use crate::services::{ShortenerService, short_url};

pub async fn shorten_url(
    service: &ShortenerService,
    url: &str,
    base_url: &str,
) -> Result<(), CliError> {
    let code = service.shorten(url).await?;

    println!(
        "{} Shortened: {} -> {}",
        "✓".bold().green(),
        code.cyan(),
        url.blue().underline()
    );
    println!("  {}", short_url(base_url, &code).magenta());
    Ok(())
}

pub async fn resolve_code(service: &ShortenerService, code: &str) -> Result<(), CliError> {
    let url = service.resolve(code).await?;
    println!("{}", url);
    Ok(())
}

pub async fn show_info(
    service: &ShortenerService,
    code: &str,
    base_url: &str,
    json: bool,
) -> Result<(), CliError> {
    let record = service.lookup(code).await?;

    if json {
        let out = serde_json::to_string_pretty(&record).map_err(UrlShrinkError::from)?;
        println!("{}", out);
        return Ok(());
    }

    println!("{} {}", "Short code:".bold(), code.cyan());
    println!("  {} {}", "Short URL:".dimmed(), short_url(base_url, code).magenta());
    println!("  {} {}", "Target:".dimmed(), record.original_url.blue().underline());
    println!("  {} {}", "Id:".dimmed(), record.id);
    println!("  {} {}", "Clicks:".dimmed(), record.click_count.to_string().yellow());
    println!(
        "  {} {}",
        "Created:".dimmed(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}
