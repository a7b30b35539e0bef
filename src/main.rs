use anyhow::{bail, Context, Result};
use clap::Parser;

use clean_share::config::Config;
use clean_share::logging::{self, Timer};
use clean_share::models::CleanResult;
use clean_share::sanitizer::{is_valid_url, RuleEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Strip tracking parameters from shared links", long_about = None)]
struct Cli {
    /// URL to clean
    url: Option<String>,

    /// Apply the generic blocklist pass when no platform rule matches
    #[arg(long)]
    generic: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Load the platform rule table from a JSON file instead of the builtin one
    #[arg(long)]
    rules: Option<String>,

    /// List supported platforms and exit
    #[arg(long)]
    list_platforms: bool,
}

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logging();

    let cli = Cli::parse();

    let engine = match cli.rules.as_ref().or(config.rules_path.as_ref()) {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rule table from {}", path))?;
            RuleEngine::from_json(&json).context("Failed to parse rule table")?
        }
        None => RuleEngine::from_embedded().context("Failed to load builtin rule table")?,
    };

    if cli.list_platforms {
        for policy in engine.platforms() {
            println!("{}: {}", policy.display_name, policy.domains.join(", "));
        }
        return Ok(());
    }

    let url = cli
        .url
        .as_deref()
        .map(str::trim)
        .context("No URL given; pass one as the first argument")?;

    if !is_valid_url(url) {
        bail!("Not a valid URL: {}", url);
    }

    let result = {
        let _timer = Timer::new("clean_url");
        engine.clean_url(url)?
    };

    let result = if !result.is_match() && cli.generic {
        engine.clean_generic(url)?
    } else {
        result
    };

    let as_json = cli.json || config.output == "json";
    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_text(url, &result);
    }

    Ok(())
}

fn render_text(original: &str, result: &CleanResult) {
    match (&result.cleaned_url, &result.platform_label) {
        (Some(cleaned), Some(platform)) => {
            println!("Platform: {}", platform);
            if result.removed_params.is_empty() {
                println!("Removed parameters: none");
            } else {
                println!("Removed parameters: {}", result.removed_params.join(", "));
            }
            println!("Clean URL: {}", cleaned);
        }
        _ => {
            println!("Platform not recognized: {}", original);
            println!("Re-run with --generic to strip standard tracking parameters (utm_*, gclid, fbclid, ...)");
        }
    }
}
