//! Console output for consultations
//!
//! Every function returns the text to print so callers decide where it goes.

use advisor_application::UsageSummary;
use advisor_domain::{BackendHandle, CapabilityRegistry, RegistryStats};
use colored::Colorize;
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Formats advisor output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human label for a provider name; unknown names are shown as-is
    pub fn provider_label(provider: &str) -> &str {
        match provider {
            "documentation" => "AWS Documentation",
            "terraform" => "Terraform",
            "cdk" => "CDK",
            "pricing" => "AWS Pricing",
            other => other,
        }
    }

    fn provider_icon(provider: &str) -> &'static str {
        match provider {
            "documentation" => "📚",
            "terraform" => "🔧",
            "cdk" => "🏗️ ",
            "pricing" => "💰",
            _ => "🔌",
        }
    }

    fn header() -> String {
        let line = "=".repeat(RULE_WIDTH);
        format!(
            "{}\n{}\n{}",
            line.cyan(),
            "☁️  AWS INFRASTRUCTURE ADVISOR".bold(),
            line.cyan()
        )
    }

    fn backend_line(backend: &BackendHandle) -> String {
        match backend {
            BackendHandle::Local(config) => {
                format!("🖥️  Running with local model: {}", config.model_id.bold())
            }
            BackendHandle::Remote(config) => {
                format!("☁️  Running with {} via AWS Bedrock", config.model_id.bold())
            }
        }
    }

    /// Interactive welcome banner
    pub fn welcome(backend: &BackendHandle, providers: &[String]) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&Self::header());
        output.push_str(&format!("\n\n{}\n", Self::backend_line(backend)));

        output.push_str("\nYour AI-powered AWS consultant with access to:\n");
        for provider in providers {
            output.push_str(&format!(
                "  {} {}\n",
                Self::provider_icon(provider),
                Self::provider_label(provider)
            ));
        }

        output.push_str("\nI can help you with:\n");
        for topic in [
            "AWS architecture and design questions",
            "Best practices and recommendations",
            "Terraform and CDK code generation",
            "Cost estimation and optimization",
            "Service comparisons and selection",
        ] {
            output.push_str(&format!("  • {}\n", topic));
        }

        output.push_str(&format!(
            "\n{}\n",
            "Type your questions or requests. Type 'exit', 'quit', or 'bye' to end.".dimmed()
        ));
        output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH).cyan()));
        output
    }

    /// Single-shot header with the query echoed back
    pub fn single_shot_header(backend: &BackendHandle, query: &str) -> String {
        format!(
            "\n{}\n{}\n\n{} {}\n",
            Self::header(),
            Self::backend_line(backend),
            "Query:".cyan().bold(),
            query
        )
    }

    pub fn connecting(aws_profile: &str) -> String {
        format!(
            "{}\n   Using AWS profile: {}\n   {}\n",
            "🔌 Connecting to MCP servers...".bold(),
            aws_profile,
            "(This may take a moment on first run...)".dimmed()
        )
    }

    /// Per-provider tool counts after a successful acquisition
    pub fn connection_summary(stats: &RegistryStats) -> String {
        let mut output = format!("\n{}\n", "✅ Connected successfully!".green().bold());
        for count in &stats.per_provider {
            output.push_str(&format!(
                "   • {}: {} tools\n",
                Self::provider_label(&count.provider),
                count.capabilities
            ));
        }
        output.push_str(&format!("   • Total: {} tools available\n", stats.total));
        output
    }

    pub fn consulting() -> String {
        format!("\n{}\n", "🤔 Consulting AWS resources...".dimmed())
    }

    /// One interactive answer followed by a separator rule
    pub fn answer(answer: &str) -> String {
        format!(
            "{}\n{}\n\n{}\n",
            "AWS Consultant:".cyan().bold(),
            answer,
            "-".repeat(RULE_WIDTH)
        )
    }

    /// The single-shot answer block
    pub fn response_block(answer: &str) -> String {
        let line = "=".repeat(RULE_WIDTH);
        format!(
            "{}\n{}\n{}\n\n{}\n",
            line.cyan(),
            "RESPONSE".bold(),
            line.cyan(),
            answer
        )
    }

    pub fn goodbye() -> String {
        "\n👋 Thank you for using AWS Infrastructure Advisor!".to_string()
    }

    pub fn interrupted() -> String {
        "\n\n👋 Consultation interrupted. Goodbye!".to_string()
    }

    pub fn saved(path: &Path) -> String {
        format!("\n💾 Conversation saved to: {}", path.display())
    }

    /// Token and tool usage for the run; empty when nothing was requested
    pub fn usage_summary(summary: &UsageSummary) -> String {
        if summary.requests == 0 {
            return String::new();
        }

        let mut output = format!("\n{}\n", "Token Usage:".cyan().bold());
        output.push_str(&format!(
            "  Input tokens:  {}\n",
            Self::thousands(summary.usage.input_tokens)
        ));
        output.push_str(&format!(
            "  Output tokens: {}\n",
            Self::thousands(summary.usage.output_tokens)
        ));
        output.push_str(&format!(
            "  Total tokens:  {}\n",
            Self::thousands(summary.usage.total())
        ));

        if !summary.tools.is_empty() {
            output.push_str(&format!("\n{}\n", "Tool Usage:".cyan().bold()));
            for (name, stats) in &summary.tools {
                output.push_str(&format!(
                    "  {}:\n    Calls: {} (Success: {}, Error: {})\n",
                    name, stats.calls, stats.successes, stats.errors
                ));
            }
        }
        output
    }

    /// Aggregated tools grouped by provider, for `--list-tools`
    pub fn tool_list(registry: &CapabilityRegistry) -> String {
        let mut output = format!(
            "\n{}\n",
            format!("Available tools from MCP servers ({}):", registry.len()).bold()
        );
        let mut current: Option<&str> = None;
        for capability in registry.iter() {
            if current != Some(capability.provider.as_str()) {
                current = Some(capability.provider.as_str());
                output.push_str(&format!(
                    "\n{}\n",
                    Self::provider_label(&capability.provider).yellow().bold()
                ));
            }
            match &capability.description {
                Some(desc) => output.push_str(&format!(
                    "  - {} {}\n",
                    capability.name,
                    Self::first_line(desc).dimmed()
                )),
                None => output.push_str(&format!("  - {}\n", capability.name)),
            }
        }
        output
    }

    /// Guidance after a setup failure
    pub fn troubleshooting(backend: &BackendHandle) -> String {
        let mut steps: Vec<String> = match backend {
            BackendHandle::Local(config) => vec![
                "Install Ollama: https://ollama.ai".to_string(),
                format!("Pull the model: ollama pull {}", config.model_id),
                "Start Ollama: ollama serve".to_string(),
            ],
            BackendHandle::Remote(config) => vec![
                "Configure AWS credentials: aws configure".to_string(),
                format!("Check AWS profile '{}' is valid", config.profile),
                "Check Bedrock model access for your region".to_string(),
            ],
        };
        steps.push(
            "Install uv for the MCP servers: https://docs.astral.sh/uv/".to_string(),
        );

        let mut output = format!("\n{}\n", "⚠️  Troubleshooting:".yellow().bold());
        for (i, step) in steps.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", i + 1, step));
        }
        output
    }

    pub fn error(message: &str) -> String {
        format!("\n{} {}", "❌ Error:".red().bold(), message)
    }

    fn first_line(text: &str) -> &str {
        text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
    }

    fn thousands(n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::{Capability, LocalModelConfig, RemoteModelConfig};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_welcome_lists_providers_and_model() {
        plain();
        let text = ConsoleFormatter::welcome(
            &BackendHandle::Local(LocalModelConfig::default()),
            &["documentation".to_string(), "pricing".to_string(), "custom".to_string()],
        );
        assert!(text.contains("Running with local model: qwen3:4b"));
        assert!(text.contains("📚 AWS Documentation"));
        assert!(text.contains("💰 AWS Pricing"));
        assert!(text.contains("custom"));
        assert!(!text.contains("Terraform\n"));
    }

    #[test]
    fn test_answer_has_rule() {
        plain();
        let text = ConsoleFormatter::answer("Use S3.");
        assert!(text.starts_with("AWS Consultant:\nUse S3.\n"));
        assert!(text.contains(&"-".repeat(80)));
    }

    #[test]
    fn test_connection_summary() {
        plain();
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider(
            "documentation",
            vec![
                Capability::new("documentation", "a"),
                Capability::new("documentation", "b"),
            ],
        );
        registry.extend_from_provider("terraform", vec![Capability::new("terraform", "c")]);

        let text = ConsoleFormatter::connection_summary(registry.stats());
        assert!(text.contains("• AWS Documentation: 2 tools"));
        assert!(text.contains("• Terraform: 1 tools"));
        assert!(text.contains("• Total: 3 tools available"));
    }

    #[test]
    fn test_usage_summary() {
        plain();
        assert!(ConsoleFormatter::usage_summary(&UsageSummary::default()).is_empty());

        let mut summary = UsageSummary::default();
        summary.requests = 2;
        summary.usage.input_tokens = 12_345;
        summary.usage.output_tokens = 678;
        summary.tools.insert(
            "get_pricing".into(),
            advisor_application::ToolStats {
                calls: 3,
                successes: 2,
                errors: 1,
            },
        );

        let text = ConsoleFormatter::usage_summary(&summary);
        assert!(text.contains("Input tokens:  12,345"));
        assert!(text.contains("Total tokens:  13,023"));
        assert!(text.contains("Calls: 3 (Success: 2, Error: 1)"));
    }

    #[test]
    fn test_troubleshooting_per_backend() {
        plain();
        let local = ConsoleFormatter::troubleshooting(&BackendHandle::Local(
            LocalModelConfig::default(),
        ));
        assert!(local.contains("ollama pull qwen3:4b"));
        assert!(local.contains("ollama serve"));

        let remote = ConsoleFormatter::troubleshooting(&BackendHandle::Remote(RemoteModelConfig {
            profile: "prod".into(),
            ..RemoteModelConfig::default()
        }));
        assert!(remote.contains("aws configure"));
        assert!(remote.contains("'prod'"));
        assert!(remote.contains("4. Install uv"));
    }

    #[test]
    fn test_tool_list_groups_by_provider() {
        plain();
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider(
            "cdk",
            vec![Capability::new("cdk", "CDKGeneralGuidance")
                .with_description("\n  Use this tool to get guidance.\n More text")],
        );
        let text = ConsoleFormatter::tool_list(&registry);
        assert!(text.contains("Available tools from MCP servers (1):"));
        assert!(text.contains("CDK\n"));
        assert!(text.contains("- CDKGeneralGuidance Use this tool to get guidance."));
    }

    #[test]
    fn test_thousands() {
        assert_eq!(ConsoleFormatter::thousands(0), "0");
        assert_eq!(ConsoleFormatter::thousands(999), "999");
        assert_eq!(ConsoleFormatter::thousands(1_000), "1,000");
        assert_eq!(ConsoleFormatter::thousands(1_234_567), "1,234,567");
    }
}
