/// List view parameters
use super::user::UserRecord;
use crate::error::AdminError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the user list is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Role,
}

impl SortKey {
    /// All keys, in the order a selector offers them
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Email, SortKey::Role];

    /// The field this key selects
    pub fn field<'a>(&self, record: &'a UserRecord) -> &'a str {
        match self {
            SortKey::Name => &record.name,
            SortKey::Email => &record.email,
            SortKey::Role => &record.role,
        }
    }

    /// Lexicographic comparison of the selected field
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        self.field(a).cmp(self.field(b))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Role => "role",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "role" => Ok(SortKey::Role),
            other => Err(AdminError::validation(format!(
                "Unknown sort key '{other}'. Use 'name', 'email' or 'role'"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Orient an ascending comparison result
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(AdminError::validation(format!(
                "Unknown sort direction '{other}'. Use 'asc' or 'desc'"
            ))),
        }
    }
}

/// Rows per page, limited to the options a page-size selector offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const OPTIONS: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = AdminError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::OPTIONS
            .into_iter()
            .find(|option| option.get() == value)
            .ok_or_else(|| {
                AdminError::validation(format!(
                    "Page size {value} is not one of 5, 10, 25, 50"
                ))
            })
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// User-controlled parameters driving the list projection
///
/// `page` is 1-based. It is only a request: projection clamps it into
/// `[1, max(1, total_pages)]` and the engine writes the clamped value back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Case-insensitive substring match of the search term against `name`
    pub fn matches(&self, record: &UserRecord) -> bool {
        self.search.is_empty() || record.name.to_lowercase().contains(&self.search.to_lowercase())
    }

    /// Full comparator for the current key and direction
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        self.direction.apply(self.sort_key.compare(a, b))
    }

    /// `page` clamped into `[1, max(1, total_pages)]`
    pub fn clamped_page(&self, total_pages: usize) -> usize {
        self.page.clamp(1, total_pages.max(1))
    }
}
