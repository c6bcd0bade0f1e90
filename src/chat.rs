//! Interactive terminal chat session.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::gemini::GeminiClient;
use crate::{Conversation, Origin, FALLBACK_MESSAGE};

/// Run a line-oriented chat session on stdin/stdout.
///
/// Each line of input is one turn: the text is appended to the transcript,
/// sent off for generation, and the reply (or the fixed fallback line) is
/// printed and appended. An empty line, `quit`, or EOF ends the session.
/// Turns are inherently serial; the next prompt only appears once the
/// current turn has finished.
pub async fn run_chat_session() -> Result<()> {
    let client = GeminiClient::from_env();
    if !client.is_configured() {
        warn!("GEMINI_API_KEY is not set; every turn will fail until it is configured");
    }

    let mut conversation = Conversation::new();
    println!("{}\n", conversation.entries()[0].text);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("quit") {
            break;
        }

        conversation.append(Origin::User, input.to_string());
        match client.request_challenge(input).await {
            Ok(challenge) => {
                info!(category = challenge.category.label(), "challenge generated");
                println!("\n{}\n", challenge.text);
                conversation.append(Origin::Assistant, challenge.text);
            }
            Err(e) => {
                warn!("challenge generation failed: {e}");
                eprintln!("Error: {e}");
                println!("\n{}\n", FALLBACK_MESSAGE);
                conversation.append(Origin::Assistant, FALLBACK_MESSAGE.to_string());
            }
        }
    }

    info!("Chat session ended with {} transcript entries", conversation.len());
    Ok(())
}
