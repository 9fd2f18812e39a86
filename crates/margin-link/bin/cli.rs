use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;

const FRONTEND_URL_ENV: &str = "MARGIN_FRONTEND_URL";

#[derive(Debug, Parser)]
#[command(name = "margin-link", about = "Embed Markdown documents in share links")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode a document as a URL-safe token.
    Encode {
        /// Document text; read from stdin when omitted.
        text: Option<String>,
    },
    /// Decode a token back into the document.
    Decode {
        token: String,
        /// Fail instead of falling back to percent-decoding.
        #[arg(long)]
        strict: bool,
    },
    /// Print a frontend link that carries the whole document.
    Link {
        #[arg(long, env = FRONTEND_URL_ENV)]
        origin: String,
        /// Document text; read from stdin when omitted.
        text: Option<String>,
    },
}

fn text_or_stdin(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read document from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { text } => {
            println!("{}", margin_link::encode(&text_or_stdin(text)?));
        }
        Command::Decode { token, strict } => {
            let markdown = if strict {
                margin_link::decode(&token)?
            } else {
                margin_link::decode_lenient(&token)?
            };
            print!("{markdown}");
        }
        Command::Link { origin, text } => {
            println!(
                "{}",
                margin_link::share_link(&origin, &text_or_stdin(text)?)
            );
        }
    }

    Ok(())
}
