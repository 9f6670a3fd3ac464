//! Admin Panel Core
//!
//! Platform-agnostic core types, traits, and error handling for the admin panel.
//!
//! This crate provides the building blocks shared by the view engine, the
//! HTTP clients, and the command-line front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserRecord`, `ViewState`, `MetricWindow`, forms
//! - **Core Traits**: `UserBackend`, `AuthProvider`
//! - **Error Handling**: Unified `AdminError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use admin_core::types::{PageSize, SortDirection, SortKey, UserForm, ViewState};
//!
//! // Describe the list the operator is looking at
//! let view = ViewState::default()
//!     .with_search("ali")
//!     .with_sort(SortKey::Email, SortDirection::Descending)
//!     .with_page_size(PageSize::Ten);
//! assert_eq!(view.page, 1);
//!
//! // Validate a form before it is submitted
//! let form = UserForm::new("Alice", "alice@example.com", "admin");
//! assert!(form.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AdminError, Result};
pub use traits::{AuthProvider, AuthSubscription, UserBackend};

pub use types::{
    // Users
    NewUser, UserForm, UserId, UserRecord, UserUpdate,
    // Authentication
    AuthIdentity, Registration,
    // List view
    PageSize, SortDirection, SortKey, ViewState,
    // Metrics
    MetricWindow,
};
