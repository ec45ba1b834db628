use eyre::{Result, bail};
use repofs_gitlab::{Filesystem, GitlabAdapter};
use std::io::Write;
use tokio::io::AsyncRead;

use crate::cli::Commands;

/// Run one file command against `adapter`, writing results to `out`.
pub async fn handle_file_command<W: Write + Send>(
    cmd: Commands,
    adapter: &GitlabAdapter,
    out: &mut W,
) -> Result<()> {
    match cmd {
        Commands::Cat { path } => {
            let contents = adapter.read(&path).await?;
            out.write_all(contents.as_bytes())?;
        }
        Commands::Show { path } => {
            let file = adapter.client().read(&path).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&file)?)?;
        }
        Commands::Stat { path } => {
            let mut metadata = adapter.get_metadata(&path).await?;
            metadata.timestamp = Some(adapter.get_timestamp(&path).await?);
            writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
        }
        Commands::Exists { path } => {
            if !adapter.has(&path).await? {
                bail!("{} does not exist on branch {}", path, adapter.client().branch());
            }
            writeln!(out, "{}", path)?;
        }
        Commands::Ls { dir, recursive } => {
            let entries = adapter
                .list_contents(dir.as_deref().unwrap_or(""), recursive)
                .await?;
            for entry in entries {
                let marker = if entry.is_file() { 'f' } else { 'd' };
                writeln!(out, "{} {}", marker, entry.path)?;
            }
        }
        Commands::Put {
            path,
            file,
            overwrite,
            message,
        } => {
            let mut reader: Box<dyn AsyncRead + Send + Unpin> = match file {
                Some(file) => Box::new(tokio::fs::File::open(&file).await?),
                None => Box::new(tokio::io::stdin()),
            };

            let committed = match message {
                Some(message) => adapter
                    .client()
                    .upload_stream(&path, &mut reader, &message, overwrite)
                    .await?
                    .file_path,
                None if overwrite => adapter.update_stream(&path, &mut reader).await?.path,
                None => adapter.write_stream(&path, &mut reader).await?.path,
            };
            writeln!(out, "Committed {} to {}", committed, adapter.client().branch())?;
        }
        Commands::Rm { path, message } => {
            match message {
                Some(message) => adapter.client().delete(&path, &message).await?,
                None => adapter.delete(&path).await?,
            }
            writeln!(out, "Deleted {}", path)?;
        }
        Commands::Cp { from, to } => {
            adapter.copy(&from, &to).await?;
            writeln!(out, "Copied {} to {}", from, to)?;
        }
        Commands::Mv { from, to } => {
            adapter.rename(&from, &to).await?;
            writeln!(out, "Moved {} to {}", from, to)?;
        }
        Commands::Mkdir { dir } => {
            let created = adapter.create_dir(&dir).await?;
            writeln!(out, "Created {}", created.path)?;
        }
        Commands::Rmdir { dir } => {
            adapter.delete_dir(&dir).await?;
            writeln!(out, "Deleted {}", dir)?;
        }
        Commands::Config { .. } => bail!("configuration commands do not use the repository"),
    }

    Ok(())
}
