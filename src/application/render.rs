//! Terminal table rendering of visible rows
//!
//! Columns: item (indented title with connector and expand marker),
//! attributes (`key: value` pairs) and the node id used by commands.

use comfy_table::{
    presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};
use itertools::Itertools;

use crate::domain::Row;

/// Printed instead of a table when there are no roots.
pub const NO_DATA_MESSAGE: &str = "No data loaded.";

const HEADERS: [&str; 3] = ["Item", "Attributes", "Id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRenderer {
    /// Spaces per depth level
    pub indent: usize,
    pub color: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            indent: 2,
            color: true,
        }
    }
}

impl TableRenderer {
    pub fn new(indent: usize, color: bool) -> Self {
        Self { indent, color }
    }

    pub fn render(&self, rows: &[Row]) -> String {
        if rows.is_empty() {
            return format!("{}\n", NO_DATA_MESSAGE);
        }

        let mut table = self.new_table();
        table.set_header(HEADERS.iter().map(|h| self.header_cell(h)).collect::<Vec<_>>());
        for row in rows {
            table.add_row(vec![
                Cell::new(self.item_cell(row)),
                Cell::new(attribute_cell(row)),
                self.uid_cell(row),
            ]);
        }
        if let Some(column) = table.column_mut(2) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        format!("{table}\n")
    }

    // Tree connectors must stay on one line, so cells never wrap.
    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Disabled);
        if self.color && colored::control::SHOULD_COLORIZE.should_colorize() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn item_cell(&self, row: &Row) -> String {
        let mut cell = String::new();
        if row.depth > 0 {
            cell.push_str(&" ".repeat(self.indent * (row.depth - 1)));
            cell.push_str(if row.is_last { "└─ " } else { "├─ " });
        }
        let marker = match (row.has_children, row.expanded) {
            (false, _) => ' ',
            (true, true) => '▾',
            (true, false) => '▸',
        };
        cell.push(marker);
        cell.push(' ');
        cell.push_str(&row.title);
        if let Some(relation) = &row.relation {
            cell.push_str(&format!(" ({})", relation));
        }
        cell
    }

    fn header_cell(&self, text: &str) -> Cell {
        Cell::new(text)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    }

    fn uid_cell(&self, row: &Row) -> Cell {
        Cell::new(row.uid).fg(Color::Yellow)
    }
}

fn attribute_cell(row: &Row) -> String {
    row.cells
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Uid;

    fn row(uid: u64, depth: usize, is_last: bool, has_children: bool, expanded: bool) -> Row {
        Row {
            uid: Uid(uid),
            depth,
            is_last,
            has_children,
            expanded,
            title: format!("n{uid}"),
            relation: (depth > 0).then(|| "kid".to_string()),
            cells: vec![("Name".into(), format!("n{uid}"))],
        }
    }

    fn line_with<'a>(out: &'a str, needle: &str) -> &'a str {
        out.lines()
            .find(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("no line with {needle:?} in:\n{out}"))
    }

    // Terminal cells taken by `text`; CJK ideographs and kana are double width.
    fn display_width(text: &str) -> usize {
        text.chars()
            .map(|c| if ('\u{3000}'..='\u{9fff}').contains(&c) { 2 } else { 1 })
            .sum()
    }

    #[test]
    fn given_no_rows_when_rendering_then_prints_placeholder() {
        let out = TableRenderer::new(2, false).render(&[]);
        assert_eq!(out, "No data loaded.\n");
    }

    #[test]
    fn given_nested_rows_when_rendering_then_draws_connectors_and_markers() {
        let rows = vec![
            row(1, 0, false, true, true),
            row(2, 1, false, false, false),
            row(3, 1, true, true, false),
            row(4, 0, true, false, false),
        ];

        let out = TableRenderer::new(2, false).render(&rows);

        assert!(line_with(&out, "Item").contains("Attributes"));
        assert!(line_with(&out, "n1").contains("▾ n1"));
        assert!(line_with(&out, "n2").contains("├─   n2 (kid)"));
        assert!(line_with(&out, "n3").contains("└─ ▸ n3 (kid)"));
        let last = line_with(&out, "Name: n4");
        assert!(last.contains("  n4"));
        assert!(last.contains(" 4 "));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn given_deep_row_when_rendering_then_indents_by_configured_width() {
        let rows = vec![row(1, 0, true, true, true), row(2, 3, true, false, false)];

        let out = TableRenderer::new(4, false).render(&rows);

        assert!(line_with(&out, "n2 (kid)").contains(&format!("{}└─   n2", " ".repeat(8))));
    }

    #[test]
    fn given_wide_glyph_title_when_rendering_then_lines_have_equal_width() {
        let mut wide = row(1, 0, false, false, false);
        wide.title = "日本語名前".to_string();
        let rows = vec![wide, row(2, 0, true, false, false)];

        let out = TableRenderer::new(2, false).render(&rows);

        let widths: Vec<usize> = out.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "widths {widths:?} in:\n{out}");
    }
}
