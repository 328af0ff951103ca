use crate::layout::validate::LayoutConfig;
use crate::layout::wrap::{wrap, Delimiters, Fragments};
use crate::model::{Column, Record};
use unicode_width::UnicodeWidthStr;

pub const LEFT_BORDER: &str = "| ";
pub const COLUMN_SEPARATOR: &str = " | ";
pub const RIGHT_BORDER: &str = " |";

/// Physical lines of one record (or of the caption row), ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRow {
    lines: Vec<String>,
}

impl ComposedRow {
    /// Number of physical lines, always at least one.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Wraps every field of `record` and lines the fragments up into rows.
pub fn compose(record: &Record, config: &LayoutConfig) -> ComposedRow {
    let cells = Column::ALL.map(|column| {
        let value = record.field(column);
        wrap(value, config.width(column), column.delimiters_for(value))
    });
    compose_cells(cells, config)
}

/// The caption row. Captions that do not fit are hard-cut.
pub fn compose_header(config: &LayoutConfig) -> ComposedRow {
    let cells = Column::ALL
        .map(|column| wrap(column.caption(), config.width(column), Delimiters::None));
    compose_cells(cells, config)
}

fn compose_cells(mut cells: [Fragments<'_>; 3], config: &LayoutConfig) -> ComposedRow {
    let widths = Column::ALL.map(|column| config.width(column));
    let mut lines = Vec::new();

    loop {
        let fragments = cells.each_mut().map(|cell| cell.next());
        if fragments.iter().all(Option::is_none) {
            break;
        }

        let mut line = String::with_capacity(config.line_width());
        line.push_str(LEFT_BORDER);
        for (idx, (fragment, width)) in fragments.into_iter().zip(widths).enumerate() {
            if idx > 0 {
                line.push_str(COLUMN_SEPARATOR);
            }
            push_padded(&mut line, fragment.unwrap_or(""), width);
        }
        line.push_str(RIGHT_BORDER);
        lines.push(line);
    }

    ComposedRow { lines }
}

fn push_padded(line: &mut String, fragment: &str, width: usize) {
    line.push_str(fragment);
    let padding = width.saturating_sub(fragment.width());
    line.extend(std::iter::repeat(' ').take(padding));
}
