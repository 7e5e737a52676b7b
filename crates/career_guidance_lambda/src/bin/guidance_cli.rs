use std::process::exit;

use career_guidance_core::interpreter::{interpret, MatchStrategy};
use career_guidance_lambda::adapters::invoke::{LocalAgentInvoker, RemoteOrchestrator};
use career_guidance_lambda::config::{
    OrchestratorConfig, DEFAULT_ORCHESTRATOR_FUNCTION, ORCHESTRATOR_FUNCTION_ENV,
};
use career_guidance_lambda::smoke::{run_smoke, LocalOrchestrator, OrchestratorTarget, SMOKE_CASES};
use clap::{Parser, Subcommand, ValueEnum};
use lambda_runtime::Error;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(
    name = "guidance_cli",
    about = "Query the career guidance orchestrator in-process or against deployed functions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one query through the orchestrator and print the response
    Ask {
        /// Free-text question, e.g. "I want to become a data engineer"
        query: String,
        #[arg(long, default_value = "cli")]
        session_id: String,
        /// Invoke the deployed orchestrator function instead of running in-process
        #[arg(long)]
        remote: bool,
        #[arg(long, env = ORCHESTRATOR_FUNCTION_ENV, default_value = DEFAULT_ORCHESTRATOR_FUNCTION)]
        function_name: String,
    },
    /// Show how a query is interpreted, including the keywords that matched
    Interpret {
        query: String,
        #[arg(value_enum, long, default_value_t = StrategyArg::FirstMatch)]
        strategy: StrategyArg,
    },
    /// Run the fixed smoke sequence and print a pass/fail summary
    Smoke {
        #[arg(long)]
        remote: bool,
        #[arg(long, env = ORCHESTRATOR_FUNCTION_ENV, default_value = DEFAULT_ORCHESTRATOR_FUNCTION)]
        function_name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    FirstMatch,
    Scored,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::FirstMatch => MatchStrategy::FirstMatch,
            StrategyArg::Scored => MatchStrategy::Scored,
        }
    }
}

async fn build_target(remote: bool, function_name: String) -> Result<Box<dyn OrchestratorTarget>, Error> {
    if remote {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        return Ok(Box::new(RemoteOrchestrator::new(
            aws_sdk_lambda::Client::new(&aws_config),
            function_name,
        )));
    }

    let config = OrchestratorConfig::from_env()?;
    let invoker = LocalAgentInvoker::new(config.match_strategy);
    Ok(Box::new(LocalOrchestrator::new(config, invoker)))
}

fn print_json(value: &Value) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            query,
            session_id,
            remote,
            function_name,
        } => {
            let target = build_target(remote, function_name).await?;
            let response = target
                .call(json!({"query": query, "sessionId": session_id}))
                .await
                .map_err(Error::from)?;

            let body = response
                .body_json()
                .unwrap_or_else(|_| Value::String(response.body.clone()));
            print_json(&json!({"statusCode": response.status_code, "body": body}))?;
            if response.status_code != 200 {
                exit(1);
            }
        }
        Commands::Interpret { query, strategy } => {
            let interpretation = interpret(&query, strategy.into());
            print_json(&serde_json::to_value(interpretation)?)?;
        }
        Commands::Smoke {
            remote,
            function_name,
        } => {
            let target = build_target(remote, function_name).await?;
            let summary = run_smoke(target.as_ref(), SMOKE_CASES).await;

            for result in &summary.results {
                match &result.failure {
                    None => println!("PASS {}", result.name),
                    Some(failure) => println!("FAIL {}: {failure}", result.name),
                }
            }
            println!(
                "\n{} passed, {} failed ({} total)",
                summary.passed(),
                summary.failed(),
                summary.results.len()
            );
            if !summary.all_passed() {
                exit(1);
            }
        }
    }
    Ok(())
}
