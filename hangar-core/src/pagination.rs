//! Page slicing for ordered listings.

use crate::error::{HangarError, Result};

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Select page `page_number` of `page_size` items.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Page index with the default applied.
    pub fn number(&self) -> u32 {
        self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER)
    }

    /// Page size with the default applied.
    pub fn size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Return items `[page * size, min(page * size + size, len))`.
///
/// A page starting exactly at the end is empty; one starting past the end is
/// rejected with [`HangarError::PageOutOfRange`].
pub fn paginate<T>(items: Vec<T>, page: &PageRequest) -> Result<Vec<T>> {
    let len = items.len();
    let size = page.size() as usize;
    let from = (page.number() as usize)
        .checked_mul(size)
        .ok_or(HangarError::PageOutOfRange {
            from: usize::MAX,
            len,
        })?;
    if from > len {
        return Err(HangarError::PageOutOfRange { from, len });
    }
    let to = from.saturating_add(size).min(len);
    Ok(items.into_iter().skip(from).take(to - from).collect())
}
