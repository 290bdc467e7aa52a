//! postfeed - List and create posts on a remote post service

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libpostfeed::{logging, Config, Draft, FeedService, Post, PostfeedError};

#[derive(Parser, Debug)]
#[command(name = "postfeed")]
#[command(version, about = "List and create posts on a remote post service")]
#[command(long_about = r#"List and create posts on a remote post service.

EXAMPLES:
    # Show the 10 most recent posts
    postfeed list

    # Show more posts
    postfeed list --limit 20

    # JSON output for scripting
    postfeed list --format json | jq '.[] | .title'

    # JSONL output (one JSON object per line)
    postfeed list --format jsonl

    # Create a post
    postfeed create --title "Hello" --body "First post"

    # Talk to another service
    POSTFEED_BASE_URL=http://localhost:3000 postfeed list

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (service unreachable, bad response, invalid config)
    3 - Invalid input
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the most recent posts
    List {
        /// Maximum number of posts to return (default: feed.initial_limit)
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Create a post
    Create {
        /// Post title
        #[arg(short, long)]
        title: String,

        /// Post body
        #[arg(short, long)]
        body: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON (array for lists)
    Json,
    /// JSON lines, one object per line
    Jsonl,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::from_env(cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Exit code for an error, taken from the library error when there is one
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PostfeedError>()
        .map(PostfeedError::exit_code)
        .unwrap_or(1)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let service = FeedService::from_config(&config)?;

    tracing::debug!(
        base_url = %config.service.base_url,
        client = service.client_name(),
        "Service ready"
    );

    match cli.command {
        Command::List { limit, format } => {
            let limit = limit.unwrap_or(config.feed.initial_limit);
            let posts = service.list_posts(1, limit).await?;
            print!("{}", format_posts(&posts, format)?);
        }
        Command::Create {
            title,
            body,
            format,
        } => {
            let post = service
                .create_post("cli", Draft::new(title, body))
                .await?;
            println!("{}", format_created(&post, format)?);
        }
    }

    Ok(())
}

fn format_posts(posts: &[Post], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for post in posts {
                out.push_str(&format!("[{}] {}\n", post.id, post.title));
                for line in post.body.lines() {
                    out.push_str(&format!("    {}\n", line));
                }
                out.push('\n');
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(posts).context("Failed to serialize posts")?;
            out.push('\n');
        }
        OutputFormat::Jsonl => {
            for post in posts {
                out.push_str(&serde_json::to_string(post).context("Failed to serialize post")?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

fn format_created(post: &Post, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("Created post {}: {}", post.id, post.title)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(post).context("Failed to serialize post")
        }
        OutputFormat::Jsonl => serde_json::to_string(post).context("Failed to serialize post"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format_lists_id_title_and_body() {
        let posts = vec![Post::new(1, "A", "line one\nline two")];

        let out = format_posts(&posts, OutputFormat::Text).unwrap();

        assert_eq!(out, "[1] A\n    line one\n    line two\n\n");
    }

    #[test]
    fn test_jsonl_format_one_object_per_line() {
        let posts = vec![Post::new(1, "A", "X"), Post::new(2, "B", "Y")];

        let out = format_posts(&posts, OutputFormat::Jsonl).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        let first: Post = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, Post::new(1, "A", "X"));
    }

    #[test]
    fn test_empty_list_prints_nothing() {
        assert_eq!(format_posts(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(format_posts(&[], OutputFormat::Json).unwrap(), "[]\n");
    }

    #[test]
    fn test_created_text() {
        let post = Post::new(101, "Hi", "Bye");
        assert_eq!(
            format_created(&post, OutputFormat::Text).unwrap(),
            "Created post 101: Hi"
        );
    }

    #[test]
    fn test_exit_code_from_library_error() {
        let err = anyhow::Error::from(PostfeedError::InvalidInput("bad".to_string()));
        assert_eq!(exit_code(&err), 3);

        let err = anyhow::anyhow!("other");
        assert_eq!(exit_code(&err), 1);
    }
}
