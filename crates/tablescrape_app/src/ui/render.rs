use tablescrape_core::{AppViewModel, NoticeLevel, TableView};

const MAX_CELL_WIDTH: usize = 32;

pub fn render(view: &AppViewModel, preview_rows: usize) -> String {
    let mut lines = Vec::new();

    if let Some(notice) = &view.notice {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        lines.push(format!("[{level}] {}", notice.text));
    }

    if view.table_count == 0 {
        if !view.fetch_in_flight {
            lines.push("No tables loaded. Type 'fetch <url>' to load a page.".to_string());
        }
        return join(lines);
    }

    lines.push(format!(
        "Tables: {} ({} selected)",
        view.table_count, view.selected_count
    ));
    for checkbox in &view.checkboxes {
        let mark = if checkbox.checked { "x" } else { " " };
        let cursor = if Some(checkbox.index) == view.position {
            "  <"
        } else {
            ""
        };
        lines.push(format!("  [{mark}] {}{cursor}", checkbox.label));
    }

    if let Some(table) = &view.current_table {
        lines.push(String::new());
        lines.push(format!("--- {} of {} ---", table.title, view.table_count));
        lines.extend(table_lines(table, preview_rows));
    }

    let mut nav = Vec::new();
    if view.can_go_back {
        nav.push("<< prev (p)");
    }
    if view.can_go_forward {
        nav.push("next (n) >>");
    }
    if !nav.is_empty() {
        lines.push(nav.join("   "));
    }

    join(lines)
}

fn table_lines(table: &TableView, preview_rows: usize) -> Vec<String> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| cell_width(c)).collect();
    for row in table.rows.iter().take(preview_rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell_width(cell));
        }
    }

    let mut lines = vec![grid_line(&table.columns, &widths)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in table.rows.iter().take(preview_rows) {
        lines.push(grid_line(row, &widths));
    }

    let hidden = table.rows.len().saturating_sub(preview_rows);
    if hidden > 0 {
        lines.push(format!("... {hidden} more row(s)"));
    }
    if table.rows.is_empty() {
        lines.push("(no rows)".to_string());
    }
    lines
}

fn grid_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let text = clip(cell);
            let pad = width.saturating_sub(text.chars().count());
            format!("{text}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn cell_width(text: &str) -> usize {
    text.chars().count().min(MAX_CELL_WIDTH)
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    clipped.push_str("...");
    clipped
}

fn join(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
