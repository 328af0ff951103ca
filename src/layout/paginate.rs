use crate::layout::row::{compose_header, ComposedRow};
use crate::layout::validate::LayoutConfig;
use std::io::{self, Write};
use tracing::{trace, warn};

/// Line written between two pages.
pub const PAGE_BREAK_MARKER: &str = "~";

const RULE_CHAR: char = '-';

/// Position on the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    /// Lines written on this page, header block included.
    pub used: usize,
    /// Records placed on this page.
    pub records: usize,
    /// 1-based page number, 0 before the first header.
    pub page: usize,
}

/// Totals of one paginated run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub records: usize,
    pub pages: usize,
    pub lines: usize,
}

/// Writes composed rows to `out`, breaking pages when a record would not fit.
///
/// Every page starts with a header block (rule, caption row, rule) and every
/// record is followed by a rule. The page check happens once per record: a
/// record taller than a whole page is written on a page of its own and
/// overflows it.
pub struct Paginator<'c, W: Write> {
    out: W,
    config: &'c LayoutConfig,
    header: ComposedRow,
    rule: String,
    state: PageState,
    summary: ReportSummary,
}

impl<'c, W: Write> Paginator<'c, W> {
    pub fn new(out: W, config: &'c LayoutConfig) -> Self {
        Self {
            out,
            config,
            header: compose_header(config),
            rule: std::iter::repeat(RULE_CHAR)
                .take(config.page_width())
                .collect(),
            state: PageState::default(),
            summary: ReportSummary::default(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Writes one record's lines and its closing rule.
    pub fn push(&mut self, row: &ComposedRow) -> io::Result<()> {
        if self.state.page == 0 {
            self.write_header()?;
        } else if self.needs_break(row) {
            self.page_break()?;
        }

        // Rows taller than a fresh page cannot be placed without overflowing.
        if self.state.records == 0 && self.state.used + row.height() + 1 > self.page_height() {
            warn!(
                record = self.summary.records + 1,
                height = row.height(),
                page_height = self.page_height(),
                "record does not fit on a page"
            );
        }

        for line in row.lines() {
            self.write_line(line)?;
        }
        self.write_rule()?;

        self.state.records += 1;
        self.summary.records += 1;
        Ok(())
    }

    /// Flushes the sink. A report without records still gets its header.
    pub fn finish(mut self) -> io::Result<(W, ReportSummary)> {
        if self.state.page == 0 {
            self.write_header()?;
        }
        self.out.flush()?;
        Ok((self.out, self.summary))
    }

    fn page_height(&self) -> usize {
        self.config.page_height()
    }

    fn needs_break(&self, row: &ComposedRow) -> bool {
        self.state.records > 0 && self.state.used + row.height() + 1 > self.page_height()
    }

    fn page_break(&mut self) -> io::Result<()> {
        trace!(
            page = self.state.page,
            used = self.state.used,
            records = self.state.records,
            "page break"
        );
        writeln!(self.out, "{PAGE_BREAK_MARKER}")?;
        self.summary.lines += 1;
        self.state = PageState {
            page: self.state.page,
            ..PageState::default()
        };
        self.write_header()
    }

    fn write_header(&mut self) -> io::Result<()> {
        self.state.page += 1;
        self.summary.pages = self.state.page;

        self.write_rule()?;
        for line in self.header.lines() {
            writeln!(self.out, "{line}")?;
            self.state.used += 1;
            self.summary.lines += 1;
        }
        self.write_rule()
    }

    fn write_rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", self.rule)?;
        self.state.used += 1;
        self.summary.lines += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.state.used += 1;
        self.summary.lines += 1;
        Ok(())
    }
}
