//! One-shot analysis from the command line.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use credence::{AnalysisRequest, app_state::AppState, config::Config, telemetry};
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(version, about = "Rate the credibility of an article or a piece of text", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["url", "text"])))]
#[command(after_help = r#"Examples:
  analyze https://example.com/news/story
  analyze --text "Scientists confirm the moon is made of cheese."
  pbpaste | analyze --text -
"#)]
struct Cli {
    /// Article URL to fetch and analyze
    #[arg(value_name = "URL", conflicts_with = "text")]
    url: Option<String>,

    /// Analyze this text instead of a URL ("-" reads stdin)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    text: Option<String>,
}

impl Cli {
    fn into_request(self) -> Result<AnalysisRequest> {
        match (self.url, self.text) {
            (_, Some(text)) if text == "-" => Ok(AnalysisRequest::RawText(read_stdin()?)),
            (_, Some(text)) => Ok(AnalysisRequest::RawText(text)),
            (Some(url), None) => Ok(AnalysisRequest::Url(url)),
            // the "input" group requires one of them
            (None, None) => anyhow::bail!("either a URL or --text is required"),
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // clap exits with status 2 on usage errors
    let cli = Cli::parse();
    telemetry::init();

    let request = cli.into_request()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let Some(analyzer) = AppState::from_config(&config).analyzer else {
        eprintln!("{} is not set.", credence::config::ENV_API_KEY);
        return Ok(ExitCode::FAILURE);
    };

    match analyzer.analyze(request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
