use serde::{Deserialize, Serialize};

use super::evaluation::MatchResult;
use super::validation::ValidationError;

/// Validated one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page_size: usize,
    page: usize,
}

impl PageRequest {
    pub fn new(page_size: i64, page: i64) -> Result<Self, ValidationError> {
        let page_size = positive("page_size", page_size)?;
        let page = positive("page", page)?;
        Ok(Self { page_size, page })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Rejects page sizes above `max`.
    pub fn within(self, max: usize) -> Result<Self, ValidationError> {
        if self.page_size > max {
            return Err(ValidationError::AboveMaximum {
                field: "page_size",
                value: i64::try_from(self.page_size).unwrap_or(i64::MAX),
                max,
            });
        }
        Ok(self)
    }
}

fn positive(field: &'static str, value: i64) -> Result<usize, ValidationError> {
    if value < 1 {
        return Err(ValidationError::BelowMinimum { field, value });
    }
    usize::try_from(value).map_err(|_| ValidationError::AboveMaximum {
        field,
        value,
        max: usize::MAX,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorInfo {
    pub count: usize,
    pub current_page: usize,
    pub first_item: Option<usize>,
    pub last_item: Option<usize>,
    pub has_more_pages: bool,
    pub has_previous_page: bool,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// Records read versus records excluded because they could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchDiagnostics {
    pub evaluated_records: usize,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<MatchResult>,
    pub paginator_info: PaginatorInfo,
    pub diagnostics: SearchDiagnostics,
}

/// Slices already-ranked results. Pages past the end come back empty with accurate totals.
pub fn paginate(ranked: Vec<MatchResult>, request: PageRequest) -> Page {
    let total = ranked.len();
    let per_page = request.page_size;
    let current_page = request.page;
    let last_page = total.div_ceil(per_page).max(1);

    let offset = (current_page - 1).saturating_mul(per_page);
    let data: Vec<MatchResult> = ranked.into_iter().skip(offset).take(per_page).collect();
    let count = data.len();

    let (first_item, last_item) = if count == 0 {
        (None, None)
    } else {
        (Some(offset + 1), Some(offset + count))
    };

    Page {
        data,
        paginator_info: PaginatorInfo {
            count,
            current_page,
            first_item,
            last_item,
            has_more_pages: offset.saturating_add(count) < total,
            has_previous_page: current_page > 1,
            last_page,
            per_page,
            total,
        },
        diagnostics: SearchDiagnostics::default(),
    }
}
