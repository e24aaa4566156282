use std::io::Write;
use std::path::Path;

use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::loader::Snapshot;
use crate::page::{clean_placeholder_brackets, Page};

/// Run the loader against the built-in page skeleton and write the HTML.
///
/// This never reads or edits an existing site page: the output is always the
/// default skeleton from `[layout]` filled with the posts.
///
/// With `output` set, the file is rewritten after every render, so it never
/// lags behind what the loader shows. Once a fallback is showing, the fetch
/// gets `loader.fallback_grace_ms` more to succeed; after that the loader is
/// abandoned and the fallback page is what gets written. Returns the snapshot
/// that was written last.
pub async fn render(ctx: &AppContext, output: Option<&Path>) -> Result<Snapshot> {
    let mut page = ctx.skeleton_page();
    let cleaned = clean_placeholder_brackets(&mut page);
    info!("Cleaned placeholder brackets in {} elements", cleaned);

    let machine = ctx.state_machine(page);
    let mut snapshots = machine.subscribe();
    let run = tokio::spawn(machine.run());

    let grace = ctx.config.loader.fallback_grace();
    let mut give_up_at: Option<Instant> = None;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                // Sender dropped: the loader has finished
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(path) = output {
                    std::fs::write(path, snapshot.page.to_html())?;
                }
                if snapshot.state.is_fallback() && give_up_at.is_none() {
                    give_up_at = Some(Instant::now() + grace);
                }
            }
            _ = wait_until(give_up_at) => {
                warn!("No content {:?} after the fallback, writing the page as is", grace);
                run.abort();
                break;
            }
        }
    }

    let snapshot = snapshots.borrow().clone();
    info!(
        "{:>8.3}s  {}",
        snapshot.elapsed.as_secs_f64(),
        snapshot.state
    );

    match output {
        Some(path) => {
            std::fs::write(path, snapshot.page.to_html())?;
            println!("Wrote {} ({})", path.display(), snapshot.state);
        }
        None => write_stdout(&snapshot.page)?,
    }

    Ok(snapshot)
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn write_stdout(page: &Page) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(page.to_html().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// One fetch attempt, no retries.
pub async fn fetch(ctx: &AppContext) -> Result<()> {
    let posts = ctx.source.fetch().await?;

    if posts.is_empty() {
        println!("No posts in {}", ctx.source_description());
        return Ok(());
    }

    let mut listed: Vec<_> = posts.iter().collect();
    listed.sort_by_key(|post| post.index);

    println!("{} posts from {}", posts.len(), ctx.source_description());
    for post in listed {
        let slot = if post.index == 0 { "featured" } else { "" };
        println!("{:>4}  {:<12}  {:<8}  {}", post.index, post.post_date, slot, post.header);
    }

    Ok(())
}

pub fn show_config(config: &Config, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
