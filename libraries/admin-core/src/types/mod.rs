mod auth;
mod form;
mod ids;
mod metrics;
mod timestamp;
mod user;
mod view;

pub use auth::{AuthIdentity, Registration};
pub use form::{NewUser, UserForm, UserUpdate};
pub use ids::UserId;
pub use metrics::MetricWindow;
pub use timestamp::parse_timestamp;
pub use user::UserRecord;
pub use view::{PageSize, SortDirection, SortKey, ViewState};
