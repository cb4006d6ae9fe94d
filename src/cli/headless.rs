//! Headless subcommands
//!
//! Print backend results as plain tables without starting the TUI.

use anyhow::Result;
use clap::Subcommand;
use helmdeck::backend::HelmBackend;

#[derive(Subcommand, Debug)]
pub enum HeadlessCommand {
    /// List installed releases in all namespaces
    Releases,
    /// List configured chart repositories
    Repos,
    /// Search charts in configured repositories
    Search {
        /// Name filter; lists every chart when omitted
        filter: Option<String>,
    },
}

pub async fn handle_headless_command(
    cmd: HeadlessCommand,
    backend: &dyn HelmBackend,
) -> Result<()> {
    let rows = match cmd {
        HeadlessCommand::Releases => {
            let mut rows = vec![header(&[
                "NAME",
                "NAMESPACE",
                "CHART",
                "APP VERSION",
                "STATUS",
                "UPDATED",
            ])];
            for release in backend.list_releases().await? {
                rows.push(vec![
                    release.name,
                    release.namespace,
                    release.chart,
                    release.app_version,
                    release.status,
                    release.updated.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }
            rows
        }
        HeadlessCommand::Repos => {
            let mut rows = vec![header(&["NAME", "URL"])];
            for repo in backend.repos().await? {
                rows.push(vec![repo.name, repo.url]);
            }
            rows
        }
        HeadlessCommand::Search { filter } => {
            let mut rows = vec![header(&[
                "NAME",
                "CHART VERSION",
                "APP VERSION",
                "DESCRIPTION",
            ])];
            let charts = backend
                .find_charts_in_repo(filter.as_deref().unwrap_or(""))
                .await?;
            for chart in charts {
                rows.push(vec![
                    chart.name,
                    chart.version,
                    chart.app_version,
                    chart.description,
                ]);
            }
            rows
        }
    };

    print!("{}", format_table(&rows));
    Ok(())
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

/// Left-aligned columns separated by two spaces; the last column is not padded
pub(crate) fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
            }
        }
        out.push('\n');
    }
    out
}
