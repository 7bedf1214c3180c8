// Interactive deletion of docker-like traffic rows, then VACUUM.

use crate::traffic_repo::TrafficRepo;
use std::io::{BufRead, Write};

/// Lists docker-like names present in the ledger, asks for confirmation
/// unless `assume_yes`, deletes their rows and reclaims space. The baseline
/// snapshot is never touched here.
pub async fn prune_docker(repo: &TrafficRepo, assume_yes: bool) -> anyhow::Result<()> {
    let names = repo.docker_interface_names().await?;
    if names.is_empty() {
        println!("No docker-like interfaces recorded");
        return Ok(());
    }

    println!("Prune all docker-like traffic rows:");
    for name in &names {
        println!(" - {}", name);
    }
    if !assume_yes && !confirm()? {
        return Ok(());
    }

    let deleted = repo.delete_names(&names).await?;
    repo.vacuum().await?;
    tracing::info!(deleted, names = names.len(), "pruned docker-like rows");
    println!("Pruned {} rows", deleted);
    Ok(())
}

fn confirm() -> anyhow::Result<bool> {
    print!("[y/N]: ");
    std::io::stdout().flush()?;
    let mut reply = String::new();
    std::io::stdin().lock().read_line(&mut reply)?;
    Ok(reply.trim().eq_ignore_ascii_case("y"))
}
