//! Page-number pagination: `page`/`pageSize` in, `offset`/`limit` and page
//! metadata out.

use rental_kernel::settings::PaginationSettings;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page must be at least 1")]
    ZeroPage,
    #[error("pageSize must be at least 1")]
    ZeroPageSize,
}

/// A validated 1-indexed page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Fill in defaults from settings and clamp the page size to the
    /// configured maximum.
    pub fn resolve(
        page: Option<u64>,
        page_size: Option<u64>,
        settings: &PaginationSettings,
    ) -> Result<Self, PaginationError> {
        let page_size = page_size.unwrap_or(settings.default_page_size);
        Self::new(
            page.unwrap_or(1),
            page_size.min(settings.max_page_size),
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub count: u64,
    pub page_count: u64,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, count: u64) -> Self {
        Self {
            page: request.page(),
            page_size: request.page_size(),
            count,
            page_count: count.div_ceil(request.page_size()),
        }
    }
}
