//! Shorten and stats commands

use colored::Colorize;

use crate::errors::Result;
use crate::services::LinkService;
use crate::storage::LinkRepository;

pub async fn shorten(links: &LinkService, url: &str, code: Option<&str>) -> Result<()> {
    let record = links.submit(url, code).await?;

    if code.is_none() {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            record.short_code.magenta()
        );
    }

    let short_url = links.short_url(&record.short_code);
    match record.expires_at {
        Some(expires_at) => println!(
            "{} {} -> {} (expires: {})",
            "✓".bold().green(),
            short_url.cyan(),
            record.original_url.blue().underline(),
            expires_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .yellow()
        ),
        None => println!(
            "{} {} -> {}",
            "✓".bold().green(),
            short_url.cyan(),
            record.original_url.blue().underline()
        ),
    }
    Ok(())
}

pub async fn stats(links: &LinkService, repo: &dyn LinkRepository, code: &str) -> Result<()> {
    let record = links.stats(code).await?;

    println!("{}", "Short link:".bold().green());
    println!("  {:<12} {}", "code", record.short_code.cyan());
    println!(
        "  {:<12} {}",
        "short url",
        links.short_url(&record.short_code).cyan()
    );
    println!(
        "  {:<12} {}",
        "target",
        record.original_url.blue().underline()
    );
    println!(
        "  {:<12} {}",
        "visits",
        record.visit_count.to_string().green()
    );
    println!(
        "  {:<12} {}",
        "created",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match record.expires_at {
        Some(expires_at) => println!(
            "  {:<12} {}",
            "expires",
            expires_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .yellow()
        ),
        None => println!("  {:<12} {}", "expires", "never".dimmed()),
    }

    println!();
    println!(
        "{} Total {} short links in {}",
        "ℹ".bold().blue(),
        repo.count().await?.to_string().green(),
        repo.backend_name()
    );
    Ok(())
}
