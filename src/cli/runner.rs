use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::export::{ExportFormat, export_rows_file};
use crate::guard::{Access, RouteGuard};
use crate::query::ResultPage;
use crate::record::Row;
use crate::session::{RoleSet, Session};
use crate::source::DataSource;
use std::sync::Arc;

use super::command::Command;
use super::util::build_spec;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

/// Execute one programmatic command against the assembled source and
/// session. The binary maps its arguments onto `Command`; tests call this
/// directly.
///
/// # Errors
/// Propagates source, spec, and persistence errors to the caller.
pub fn run(
    source: &dyn DataSource,
    session: &Arc<Session>,
    cmd: Command,
    mode: OutputMode,
) -> Result<(), ConsoleError> {
    match cmd {
        Command::Datasets => {
            match mode {
                OutputMode::Json => {
                    let names: Vec<&str> = DatasetKind::ALL.iter().map(|k| k.as_str()).collect();
                    println!("{}", serde_json::to_string(&names)?);
                }
                _ => {
                    for kind in DatasetKind::ALL {
                        println!("{kind}");
                    }
                }
            }
            Ok(())
        }
        Command::Query { dataset, search, filters, from, to, sort, page, size } => {
            let kind: DatasetKind = dataset.parse()?;
            let spec = build_spec(kind, search, filters, from, to, sort, page, size)?;
            let result = source.page(kind, &spec)?;
            print_page(kind, &result, mode)?;
            Ok(())
        }
        Command::Count { dataset, search, filters, from, to } => {
            let kind: DatasetKind = dataset.parse()?;
            let spec = build_spec(kind, search, filters, from, to, None, 0, 1)?;
            let result = source.page(kind, &spec)?;
            match mode {
                OutputMode::Json => {
                    println!("{}", serde_json::json!({"count": result.total_count}));
                }
                _ => println!("{}", result.total_count),
            }
            Ok(())
        }
        Command::Export { dataset, file, format, search, filters, from, to, sort } => {
            let kind: DatasetKind = dataset.parse()?;
            let format: ExportFormat = format.as_deref().unwrap_or("csv").parse()?;
            if format.is_remote() {
                return Err(ConsoleError::Config(format!(
                    "{} exports are rendered by the reporting endpoint; use csv or ndjson here",
                    format.as_str()
                )));
            }
            // First learn the filtered total, then pull every row of it.
            let probe = build_spec(kind, search, filters, from, to, sort, 0, 1)?;
            let total = source.page(kind, &probe)?.total_count;
            let spec = probe.with_size(total.max(1));
            let rows = source.page(kind, &spec)?.content;
            let report = export_rows_file(&rows, kind.schema(), format, &file)?;
            match mode {
                OutputMode::Json => {
                    println!(
                        "{}",
                        serde_json::json!({"written": report.written, "file": file.display().to_string()})
                    );
                }
                OutputMode::Plain => println!("{}", report.written),
                OutputMode::Human => {
                    println!("wrote {} rows to {}", report.written, file.display());
                }
            }
            Ok(())
        }
        Command::SessionSet { token, username, roles, file } => {
            session.authenticate(&token, &username, RoleSet::parse(&roles));
            let path = file
                .or_else(crate::session::default_path)
                .ok_or_else(|| ConsoleError::Config("no config directory for session".into()))?;
            crate::session::save_from(session, &path)?;
            if mode == OutputMode::Human {
                println!("session saved for {username}");
            }
            Ok(())
        }
        Command::SessionShow => {
            match (session.username(), mode) {
                (Some(username), OutputMode::Json) => {
                    println!(
                        "{}",
                        serde_json::json!({"username": username, "roles": session.roles().joined()})
                    );
                }
                (Some(username), _) => println!("{username} [{}]", session.roles().joined()),
                (None, OutputMode::Json) => println!("{}", serde_json::json!({"username": null})),
                (None, _) => println!("unauthenticated"),
            }
            Ok(())
        }
        Command::SessionClear { file } => {
            session.clear();
            if let Some(path) = file.or_else(crate::session::default_path) {
                crate::session::clear_saved(&path)?;
            }
            Ok(())
        }
        Command::GuardCheck { role } => {
            let guard = RouteGuard::new(session.clone());
            let access = guard.check(role.as_deref());
            match mode {
                OutputMode::Json => {
                    println!(
                        "{}",
                        serde_json::json!({"granted": access == Access::Granted})
                    );
                }
                _ => println!(
                    "{}",
                    if access == Access::Granted { "granted" } else { "redirect-to-login" }
                ),
            }
            Ok(())
        }
    }
}

fn print_page(kind: DatasetKind, page: &ResultPage<Row>, mode: OutputMode) -> Result<(), ConsoleError> {
    let columns = kind.schema().columns;
    match mode {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(page)?),
        OutputMode::Plain => {
            for row in &page.content {
                let cells: Vec<String> = columns.iter().map(|c| row.render(c)).collect();
                println!("{}", cells.join("\t"));
            }
        }
        OutputMode::Human => {
            println!(
                "page {}/{} ({} records)",
                page.page_index + 1,
                page.page_count,
                page.total_count
            );
            println!("{}", columns.join(" | "));
            for row in &page.content {
                let cells: Vec<String> = columns.iter().map(|c| row.render(c)).collect();
                println!("{}", cells.join(" | "));
            }
        }
    }
    Ok(())
}
