use crate::db::audit;
use crate::errors::AppResult;
use crate::models::audit::{AuditAction, AuditEntry};
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;

const DESC_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    match RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// ANSI colour per action kind.
fn color_for_action(action: AuditAction) -> Colour {
    match action {
        AuditAction::Insert => Colour::Green,
        AuditAction::Update => Colour::Yellow,
        AuditAction::Delete => Colour::Red,
        AuditAction::Import => Colour::RGB(255, 153, 51),
    }
}

/// Old → new part of a line, omitted when both are empty.
fn change_text(e: &AuditEntry) -> Option<String> {
    match (e.old_value.is_empty(), e.new_value.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("was: {}", e.old_value)),
        (true, false) => Some(format!("now: {}", e.new_value)),
        (false, false) => Some(format!("{} → {}", e.old_value, e.new_value)),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(
        conn: &Connection,
        limit: usize,
        action: Option<AuditAction>,
        table: Option<&str>,
    ) -> AppResult<()> {
        let entries = audit::query(conn, limit, action, table)?;

        if entries.is_empty() {
            println!("📜 Audit log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let target_w = entries
            .iter()
            .map(|e| format!("{} {}#{}", e.action, e.table_name, e.record_id).len())
            .max()
            .unwrap_or(10);

        println!("📜 Audit log (newest first):\n");

        for e in &entries {
            let colored = format!(
                "{} {}#{}",
                color_for_action(e.action).paint(e.action.to_db_str()),
                e.table_name,
                e.record_id
            );
            let padding = " ".repeat(target_w.saturating_sub(strip_ansi(&colored).len()));

            let wrapped = textwrap::wrap(&e.description, DESC_WIDTH);
            let indent = " ".repeat(id_w + 2 + e.timestamp.len() + 3 + target_w + 4);

            for (i, line) in wrapped.iter().enumerate() {
                if i == 0 {
                    println!(
                        "{:>id_w$}: {} | {}{} => {}",
                        e.id,
                        e.timestamp,
                        colored,
                        padding,
                        line,
                        id_w = id_w
                    );
                } else {
                    println!("{}{}", indent, line);
                }
            }

            if let Some(change) = change_text(e) {
                println!("{}{}", indent, Colour::Fixed(244).paint(change));
            }
        }

        Ok(())
    }
}
