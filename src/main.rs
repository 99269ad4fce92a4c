use log::error;
use recipe_genie::config::GenieConfig;
use recipe_genie::generators::CompletionGenerator;
use recipe_genie::{parse_model_output, server, GenieError, RecipeRecord, RecipeService};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage:
  recipe-genie serve                 Run the HTTP API
  recipe-genie ask <query...>        Ask the configured model once
  recipe-genie parse <file> [query]  Normalize a saved model output";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let result = match command.as_str() {
        "serve" => serve().await,
        "ask" if !rest.is_empty() => ask(&rest.join(" ")).await,
        "parse" if !rest.is_empty() => parse(&rest[0], rest.get(1).map_or("", String::as_str)).await,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the service; a backend that cannot be set up leaves it unavailable.
fn build_service(config: &GenieConfig) -> RecipeService {
    match CompletionGenerator::new(&config.model) {
        Ok(generator) => RecipeService::new(Box::new(generator)),
        Err(e) => {
            error!("FATAL: Error during model setup: {}", e);
            RecipeService::unavailable()
        }
    }
}

async fn serve() -> Result<(), GenieError> {
    let config = GenieConfig::load()?;
    let service = build_service(&config);
    server::serve(service, &config.server.address()).await
}

async fn ask(query: &str) -> Result<(), GenieError> {
    let config = GenieConfig::load()?;
    let record = build_service(&config).suggest(query).await?;
    print_record(&record);
    Ok(())
}

async fn parse(path: &str, query: &str) -> Result<(), GenieError> {
    let raw = tokio::fs::read_to_string(path).await?;
    print_record(&parse_model_output(&raw, query));
    Ok(())
}

fn print_record(record: &RecipeRecord) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to serialize record: {}", e),
    }
}
