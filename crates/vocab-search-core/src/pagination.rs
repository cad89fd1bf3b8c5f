//! Page metadata for paginated search responses

use serde::Serialize;

/// A page reference: zero-based page number plus the number of rows on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub number: u64,
    pub size: u64,
}

impl PageRef {
    pub const fn new(number: u64, size: u64) -> Self {
        Self { number, size }
    }
}

/// Navigation metadata for one page of a result set.
///
/// `last` is `None` when the result set is empty; there is no page to land
/// on in that case, so no `next` is produced either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMetadata {
    #[serde(rename = "self")]
    pub current: PageRef,
    pub first: PageRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
}

impl PaginationMetadata {
    /// Compute navigation metadata for `page` of a result set with `total`
    /// rows split in pages of `size` rows. A `size` of zero is treated as one.
    pub fn compute(page: u64, size: u64, total: u64) -> Self {
        let size = size.max(1);
        let current = PageRef::new(page, size);
        let first = PageRef::new(0, size);
        let prev = (page > 0).then(|| PageRef::new(page - 1, size));

        if total == 0 {
            return Self {
                current,
                first,
                last: None,
                prev,
                next: None,
            };
        }

        let remainder = total % size;
        let (last_number, last_size) = if remainder == 0 {
            (total / size - 1, size)
        } else {
            (total / size, remainder)
        };

        let next = (page < last_number).then(|| {
            let number = page + 1;
            let next_size = if number == last_number { last_size } else { size };
            PageRef::new(number, next_size)
        });

        Self {
            current,
            first,
            last: Some(PageRef::new(last_number, last_size)),
            prev,
            next,
        }
    }

    /// True when the result set has no rows at all
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
