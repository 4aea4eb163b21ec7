//! Interactive command-line client for the Reverie agent.

use anyhow::Context;
use autoagents_llm::LLMProvider;
use autoagents_llm::backends::openai::OpenAI;
use autoagents_llm::builder::LLMBuilder;
use clap::Parser;
use log::{debug, info};
use reverie::config::{ConfigOverrides, LoadOptions, ReverieConfig};
use reverie::{
    HELP_TEXT, MemoryAgent, ReplInput, SlashCommand, render_memories, until_interrupted,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Command-line options for the interactive client.
#[derive(Parser)]
#[command(name = "reverie", version)]
struct Cli {
    /// Optional path to a reverie.json5 config file applied over the discovered layers
    #[arg(long)]
    config: Option<PathBuf>,
    /// Model name override
    #[arg(long)]
    model: Option<String>,
    /// Core memory file override
    #[arg(long)]
    memory_file: Option<PathBuf>,
    /// Prompt template file override
    #[arg(long)]
    prompt_file: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

type InputLines = Lines<BufReader<Stdin>>;

/// Entry point for the interactive client.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    reverie::init_logging(cli.verbose);
    info!(
        "starting reverie (config_set={}, model_set={}, memory_file_set={}, prompt_file_set={})",
        cli.config.is_some(),
        cli.model.is_some(),
        cli.memory_file.is_some(),
        cli.prompt_file.is_some()
    );
    let config = load_config(&cli)?;

    println!("=== Reverie ===");
    println!("An AI agent that develops through core memories and persistent experiences.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let Some(api_key) = resolve_api_key(&config.model.api_key_env, &mut lines).await? else {
        println!("API key required. Exiting.");
        return Ok(());
    };

    info!("building LLM provider (model={})", config.model.name);
    let llm: Arc<dyn LLMProvider> = LLMBuilder::<OpenAI>::new()
        .api_key(api_key)
        .model(config.model.name.clone())
        .temperature(config.model.temperature)
        .build()
        .context("failed to build OpenAI LLM provider")?;
    let mut agent = MemoryAgent::from_config(llm, &config);
    println!("Agent initialized successfully!");
    println!();
    println!("{HELP_TEXT}");

    loop {
        print!("\nYou: ");
        std::io::stdout().flush().context("failed to flush stdout")?;
        let Some(line) = until_interrupted(lines.next_line(), tokio::signal::ctrl_c()).await
        else {
            println!("\n\nInterrupted by user.");
            break;
        };
        let Some(line) = line.context("failed to read input")? else {
            println!();
            break;
        };
        match ReplInput::parse(&line) {
            ReplInput::Empty => continue,
            ReplInput::Command(SlashCommand::Quit) => {
                println!("Goodbye!");
                break;
            }
            ReplInput::Command(SlashCommand::Memories) => {
                print!("{}", render_memories(&agent.store().read()));
            }
            ReplInput::Command(SlashCommand::Help) => print!("{HELP_TEXT}"),
            ReplInput::Message(text) => {
                let Some(response) =
                    until_interrupted(agent.chat(&text), tokio::signal::ctrl_c()).await
                else {
                    println!("\n\nInterrupted by user.");
                    break;
                };
                println!("\nAgent: {response}");
            }
        }
    }
    debug!("session ended (session_id={})", agent.session_id());
    Ok(())
}

/// Load layered config with command-line flags as the final layer.
fn load_config(cli: &Cli) -> anyhow::Result<ReverieConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LoadOptions::new(&cwd).with_overrides(ConfigOverrides {
        model: cli.model.clone(),
        memory_path: cli.memory_file.clone(),
        prompt_template_path: cli.prompt_file.clone(),
    });
    if let Some(path) = cli.config.as_ref() {
        options = options.with_config_file(path);
    }
    let layered = ReverieConfig::load(&options).context("failed to load config")?;
    for layer in &layered.layers {
        info!("config layer applied ({layer})");
    }
    Ok(layered.config)
}

/// Read the credential from the environment, or ask for it.
async fn resolve_api_key(env_name: &str, lines: &mut InputLines) -> anyhow::Result<Option<String>> {
    if let Ok(key) = std::env::var(env_name)
        && !key.trim().is_empty()
    {
        debug!("using credential from environment (var={env_name})");
        return Ok(Some(key));
    }
    print!("Please enter your API key ({env_name}): ");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let line = lines.next_line().await.context("failed to read API key")?;
    Ok(line
        .map(|line| line.trim().to_string())
        .filter(|key| !key.is_empty()))
}
