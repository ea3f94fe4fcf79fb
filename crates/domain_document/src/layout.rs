//! Text layout and pagination
//!
//! Sections are laid out as plain-text grid tables in [`SectionKind::ALL`]
//! order, then cut into pages of a fixed line count. Every page ends with
//! the document footer. A line marked keep-with-next (section titles and
//! their rules) is never the last body line on a page.

use crate::document::{
    Callout, DocumentSection, Field, ReservationDocument, SectionBody, SectionKind, Table,
};
use crate::error::DocumentError;

/// Blank separator plus the footer line
pub const FOOTER_LINES: usize = 2;

/// Smallest page that fits a section heading, one table row and the footer
pub const MIN_PAGE_LINES: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    keep_with_next: bool,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keep_with_next: false,
        }
    }

    fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keep_with_next: true,
        }
    }

    fn blank() -> Self {
        Self::plain(String::new())
    }
}

/// A paginated document, one `Vec` of lines per page including the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedText {
    pub pages: Vec<Vec<String>>,
}

impl PagedText {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with a form feed between them
    pub fn into_text(self) -> String {
        self.pages
            .into_iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\u{000C}\n")
    }
}

/// Lays out and paginates a complete document
pub fn layout(document: &ReservationDocument, page_lines: usize) -> Result<PagedText, DocumentError> {
    if page_lines < MIN_PAGE_LINES {
        return Err(DocumentError::render(format!(
            "page of {} lines is smaller than the minimum of {}",
            page_lines, MIN_PAGE_LINES
        )));
    }

    let mut lines = vec![
        Line::plain(document.title.to_uppercase()),
        Line::plain("=".repeat(display_width(&document.title))),
    ];
    lines.extend(document.header_lines.iter().map(Line::plain));
    lines.push(Line::blank());

    for kind in SectionKind::ALL {
        let section = document
            .section(kind)
            .ok_or_else(|| DocumentError::IncompleteDocument { missing: vec![kind] })?;
        lines.extend(section_lines(section));
    }

    let bodies = paginate(&lines, page_lines - FOOTER_LINES);
    let total = bodies.len();
    let pages = bodies
        .into_iter()
        .enumerate()
        .map(|(i, mut body)| {
            body.push(String::new());
            body.push(document.footer.render(i + 1, total));
            body
        })
        .collect();

    Ok(PagedText { pages })
}

fn section_lines(section: &DocumentSection) -> Vec<Line> {
    let mut lines = vec![
        Line::heading(section.title.clone()),
        Line::heading("-".repeat(display_width(&section.title))),
    ];

    match &section.body {
        SectionBody::Fields(fields) => lines.extend(field_grid(fields)),
        SectionBody::Table(table) => lines.extend(table_grid(table)),
        SectionBody::Payment { fields, callout } => {
            lines.extend(field_grid(fields));
            lines.push(Line::blank());
            lines.extend(callout_box(callout));
        }
        SectionBody::Notes(notes) => {
            lines.extend(
                notes
                    .iter()
                    .enumerate()
                    .map(|(i, note)| Line::plain(format!("{}. {}", i + 1, note))),
            );
        }
    }

    lines.push(Line::blank());
    lines
}

fn field_grid(fields: &[Field]) -> Vec<Line> {
    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|f| vec![f.label.clone(), f.value.clone()])
        .collect();
    grid(None, &rows)
}

fn table_grid(table: &Table) -> Vec<Line> {
    grid(Some(&table.headers), &table.rows)
}

fn callout_box(callout: &Callout) -> Vec<Line> {
    let text = format!("{}: {}", callout.label, callout.value);
    let rule = format!("+{}+", "=".repeat(display_width(&text) + 2));
    vec![
        Line::heading(rule.clone()),
        Line::heading(format!("| {} |", text)),
        Line::plain(rule),
    ]
}

/// ASCII grid; the header row, when present, is kept with the first data row
fn grid(headers: Option<&Vec<String>>, rows: &[Vec<String>]) -> Vec<Line> {
    let columns = headers
        .map(Vec::len)
        .into_iter()
        .chain(rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in headers.into_iter().chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let rule = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let render_row = |row: &[String]| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!(" {}{} ", cell, " ".repeat(w - display_width(cell)))
            })
            .collect();
        format!("|{}|", cells.join("|"))
    };

    let mut lines = vec![Line::heading(rule.clone())];
    if let Some(headers) = headers {
        lines.push(Line::heading(render_row(headers.as_slice())));
        lines.push(Line::heading(rule.clone()));
    }
    lines.extend(rows.iter().map(|row| Line::plain(render_row(row.as_slice()))));
    lines.push(Line::plain(rule));
    lines
}

/// Splits lines into page bodies of at most `capacity` lines
fn paginate(lines: &[Line], capacity: usize) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];

        if current.is_empty() && line.text.is_empty() && !pages.is_empty() {
            i += 1;
            continue;
        }

        let needed = if line.keep_with_next {
            keep_chain_len(&lines[i..]).min(capacity)
        } else {
            1
        };
        if !current.is_empty() && current.len() + needed > capacity {
            pages.push(std::mem::take(&mut current));
            continue;
        }

        current.push(line.text.clone());
        i += 1;
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

/// Consecutive keep-with-next lines plus the line they are kept with
fn keep_chain_len(lines: &[Line]) -> usize {
    let chained = lines.iter().take_while(|l| l.keep_with_next).count();
    (chained + 1).min(lines.len())
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<Line> {
        (0..n).map(|i| Line::plain(format!("line {}", i))).collect()
    }

    #[test]
    fn test_paginate_splits_at_capacity() {
        let pages = paginate(&lines(25), 10);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[2].len(), 5);
    }

    #[test]
    fn test_heading_never_ends_a_page() {
        let mut input = lines(9);
        input.push(Line::heading("Başlık"));
        input.push(Line::heading("------"));
        input.push(Line::plain("satır"));

        let pages = paginate(&input, 10);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 9);
        assert_eq!(pages[1][0], "Başlık");
    }

    #[test]
    fn test_leading_blank_dropped_on_new_page() {
        let mut input = lines(10);
        input.push(Line::blank());
        input.push(Line::plain("son"));

        let pages = paginate(&input, 10);
        assert_eq!(pages[1], vec!["son".to_string()]);
    }

    #[test]
    fn test_grid_pads_by_characters() {
        let rows = vec![vec!["İsim".to_string(), "Ayşe".to_string()]];
        let grid = grid(None, &rows);
        let widths: Vec<usize> = grid.iter().map(|l| display_width(&l.text)).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(grid[1].text, "| İsim | Ayşe |");
    }
}
