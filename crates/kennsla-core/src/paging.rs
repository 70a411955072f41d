//! Page container and paging metadata for list operations.

use serde::{Deserialize, Serialize};

/// Items per page for the course listing unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paging metadata, computed from the total item count and the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
  /// 1-based page number the items were sliced for.
  pub page_number: u32,
  pub page_size:   u32,
  pub total_items: u32,
  pub page_count:  u32,
}

impl PageInfo {
  pub fn compute(page_number: u32, page_size: u32, total_items: u32) -> Self {
    Self {
      page_number,
      page_size,
      total_items,
      page_count: total_items.div_ceil(page_size),
    }
  }
}

/// One page of items plus its paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
  pub items:  Vec<T>,
  pub paging: PageInfo,
}
