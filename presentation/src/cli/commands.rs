//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for aws-advisor
#[derive(Parser, Debug)]
#[command(name = "aws-advisor")]
#[command(author, version, about = "AI-powered AWS infrastructure consultant")]
#[command(long_about = r#"
AWS Advisor answers architecture, infrastructure-as-code and pricing
questions. It grounds its answers in tools provided by MCP servers:

  documentation   Official AWS documentation search
  terraform       Terraform registry and AWS provider docs
  cdk             AWS CDK constructs and guidance
  pricing         Real-time AWS pricing

With no QUERY an interactive session starts. Type 'exit', 'quit', 'bye'
or 'q' to leave it.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./advisor.toml      Project-level config
3. ~/.config/aws-advisor/config.toml   Global config

Example:
  aws-advisor
  aws-advisor What does an m5.large cost in us-east-1?
  aws-advisor --local --aws-profile prod "Terraform for a private S3 bucket"
"#)]
pub struct Cli {
    /// Ask a single question and exit (words are joined with spaces)
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// AWS profile for Bedrock and the pricing server (default: $AWS_PROFILE or "default")
    #[arg(long, value_name = "NAME")]
    pub aws_profile: Option<String>,

    /// Use the local Ollama model instead of Bedrock
    #[arg(long)]
    pub local: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and effective config, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Connect to the providers, list their tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Directory for consultation transcripts (overrides [output].dir)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Append machine-readable conversation events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Single-shot query, if any words were given
    pub fn single_query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_is_interactive() {
        let cli = Cli::parse_from(["aws-advisor"]);
        assert!(cli.single_query().is_none());
        assert!(!cli.local);
        assert!(cli.aws_profile.is_none());
    }

    #[test]
    fn test_query_words_are_joined() {
        let cli = Cli::parse_from(["aws-advisor", "Get", "EC2", "pricing"]);
        assert_eq!(cli.single_query().as_deref(), Some("Get EC2 pricing"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "aws-advisor",
            "--local",
            "--aws-profile",
            "prod",
            "-vv",
            "--output-dir",
            "/tmp/out",
            "What is S3?",
        ]);
        assert!(cli.local);
        assert_eq!(cli.aws_profile.as_deref(), Some("prod"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.single_query().as_deref(), Some("What is S3?"));
    }
}
