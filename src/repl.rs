//! Line-oriented read-eval-print loop
//!
//! Reads commands from any async reader and writes output to any async writer,
//! so the same loop drives stdin/stdout in the binary and byte buffers in tests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{Command, Outcome, Session};

/// Prompt printed before every line is read
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it into words on whitespace
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the REPL until `exit` is entered or the reader reaches end of input
///
/// Command failures are reported to the writer and do not end the loop; only
/// I/O errors on the reader or writer are returned.
pub async fn run<R, W>(session: &mut Session, reader: R, writer: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let words = clean_input(&line);
        let Some((word, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::from_str(word) else {
            writer
                .write_all(format!("{} is not a command.\n", word).as_bytes())
                .await?;
            continue;
        };

        match command.execute(session, args).await {
            Ok(Outcome::Continue(output)) => writer.write_all(output.as_bytes()).await?,
            Ok(Outcome::Exit(output)) => {
                writer.write_all(output.as_bytes()).await?;
                break;
            }
            Err(err) => {
                tracing::warn!(command = word.as_str(), error = %err, "command failed");
                writer
                    .write_all(format!("Error executing {} command: {}\n", word, err).as_bytes())
                    .await?;
            }
        }
    }

    writer.flush().await
}
