//! Admin Panel - View Engines
//!
//! Pure transformations over a users snapshot.
//!
//! This crate provides:
//! - List projection: case-insensitive name search, stable sort by name,
//!   email or role, and page slicing with a clamped page index
//! - Registration metrics: counts per overlapping time window (24h, 7d,
//!   15d, 30d) and the chart data derived from them
//!
//! # Architecture
//!
//! `admin-view` does no I/O:
//! - No dependency on reqwest (the HTTP clients)
//! - No dependency on tokio (the refresh timer)
//! - Works on whatever snapshot the caller last fetched
//!
//! # Example: List Projection
//!
//! ```rust
//! use admin_core::{SortDirection, SortKey, UserRecord, ViewState};
//! use admin_view::project;
//!
//! let users = vec![
//!     UserRecord::new("1", "Alice", "alice@example.com", "admin"),
//!     UserRecord::new("2", "Bob", "bob@example.com", "viewer"),
//!     UserRecord::new("3", "Alison", "alison@example.com", "viewer"),
//! ];
//!
//! let state = ViewState::default()
//!     .with_search("ali")
//!     .with_sort(SortKey::Name, SortDirection::Descending);
//! let page = project(&users, &state);
//!
//! let names: Vec<&str> = page.rows.iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, vec!["Alison", "Alice"]);
//! assert_eq!(page.total_pages, 1);
//! ```
//!
//! # Example: Registration Metrics
//!
//! ```rust
//! use admin_core::UserRecord;
//! use admin_view::MetricsAggregator;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let users = vec![
//!     UserRecord::new("1", "Alice", "alice@example.com", "admin").created(now - Duration::hours(2)),
//!     UserRecord::new("2", "Bob", "bob@example.com", "viewer").created(now - Duration::days(10)),
//! ];
//!
//! let report = MetricsAggregator::default().aggregate(&users, now);
//! assert_eq!(report.counts(), vec![1, 1, 2, 2]);
//! ```

mod chart;
mod list_view;
mod metrics;

pub use chart::ChartData;
pub use list_view::{project, ListViewEngine, PageView};
pub use metrics::{MetricsAggregator, MetricsReport, WindowCount};
