#[cfg(test)]
mod test;

pub mod service;

use std::process::ExitCode;

use arbiter_judge::etc;
use clap::Parser;

use crate::service::{args, Service};

fn init_logger() {
  pretty_env_logger::formatted_builder()
    .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
    .init();
}

async fn run(args: &args::Args) -> Result<serde_json::Value, service::Error> {
  let cfg = etc::load_config(&args.config_search_path)
    .map_err(|e| service::Error::Config(e.to_string()))?;
  let body = service::read_request(args.request.as_deref()).await?;
  return Service::new(&cfg).handle(args.command, &body).await;
}

#[tokio::main]
async fn main() -> ExitCode {
  init_logger();
  let args = args::Args::parse();

  match run(&args).await {
    Ok(res) => {
      println!("{:#}", res);
      ExitCode::SUCCESS
    }
    Err(err) => {
      log::error!("{:?} failed: {}", args.command, err);
      println!("{:#}", serde_json::json!(err.to_response()));
      ExitCode::FAILURE
    }
  }
}
