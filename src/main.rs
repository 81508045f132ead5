//! Interview Eval CLI
//!
//! Evaluate interview answers through an LLM generation endpoint.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interview_eval::{config::Config, evaluator::AnswerEvaluator, gemini::GeminiClient};

/// Interview Eval - LLM-backed evaluation of interview answers
#[derive(Parser)]
#[command(name = "interview-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a candidate's answer to an interview question
    Evaluate {
        /// The interview question that was asked
        question: String,

        /// The candidate's answer
        answer: String,

        /// Seconds the candidate took to answer
        #[arg(short, long, default_value_t = 0)]
        duration: u32,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test connectivity to the generation API
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            question,
            answer,
            duration,
            json,
        } => cmd_evaluate(question, answer, duration, json).await,
        Commands::Test => cmd_test().await,
    }
}

async fn cmd_evaluate(question: String, answer: String, duration: u32, json: bool) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let client = GeminiClient::new(config.gemini.clone());
    let evaluator = AnswerEvaluator::with_template(client, config.prompt_template());

    let evaluation = evaluator
        .evaluate(&question, &answer, duration)
        .await
        .context("Evaluation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    if evaluation.is_generic {
        println!("The answer was too generic to score.");
        println!("Follow-up: {}", evaluation.follow_up_question);
    } else {
        println!("Score: {:.0}/100", evaluation.score);
        println!("Feedback: {}", evaluation.feedback);
    }

    Ok(())
}

async fn cmd_test() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    println!("Testing connection to {}...", config.gemini.api_base);
    println!("Using model: {}", config.gemini.model);

    let client = GeminiClient::new(config.gemini.clone());
    client
        .test_connection()
        .await
        .context("Connection test failed")?;

    println!("Connection OK.");
    Ok(())
}
