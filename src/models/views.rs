use crate::clients::FetchError;

/// Per-site counts for `--stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRow {
    pub site: String,
    pub host_count: usize,
    pub service_count: usize,
    pub problem_count: usize,
}

impl SummaryRow {
    pub fn total<'a>(rows: impl IntoIterator<Item = &'a SummaryRow>) -> SummaryRow {
        rows.into_iter().fold(
            SummaryRow {
                site: "TOTAL".to_string(),
                ..Default::default()
            },
            |mut acc, row| {
                acc.host_count += row.host_count;
                acc.service_count += row.service_count;
                acc.problem_count += row.problem_count;
                acc
            },
        )
    }
}

/// One failing check for `--problems`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemRow {
    pub site: String,
    pub host: String,
    pub check: String,
    pub message: String,
}

/// A server that could not be queried. Reported beside the table, never in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub site: String,
    pub error: FetchError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<R> {
    pub rows: Vec<R>,
    pub total: Option<SummaryRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rows that know how to lay themselves out as table cells.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for SummaryRow {
    const HEADERS: &'static [&'static str] = &["Site", "Hosts", "Services", "Problems"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.site.clone(),
            self.host_count.to_string(),
            self.service_count.to_string(),
            self.problem_count.to_string(),
        ]
    }
}

impl TableRow for ProblemRow {
    const HEADERS: &'static [&'static str] = &["Nagios Server", "Host", "Check", "Message"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.site.clone(),
            self.host.clone(),
            self.check.clone(),
            self.message.clone(),
        ]
    }
}
