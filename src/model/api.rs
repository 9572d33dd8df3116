use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}

/// Maximum page size accepted by paginated endpoints.
pub const MAX_PER_PAGE: u64 = 100;

/// Zero-indexed pagination query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    10
}

impl PaginationQuery {
    /// Returns `(page, per_page)` with `per_page` clamped to `1..=MAX_PER_PAGE`.
    pub fn clamped(&self) -> (u64, u64) {
        (self.page, self.per_page.clamp(1, MAX_PER_PAGE))
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: default_per_page(),
        }
    }
}
