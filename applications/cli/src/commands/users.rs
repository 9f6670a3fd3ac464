/// `users` subcommands
use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use crate::output;
use admin_core::{AdminError, PageSize, UserBackend, UserForm, UserId, ViewState};
use admin_view::ListViewEngine;
use chrono::Utc;
use std::io::Write;
use tracing::info;

/// Fields to change on an existing user; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    fn apply(self, mut form: UserForm) -> UserForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(role) = self.role {
            form.role = role;
        }
        form
    }
}

/// Fetch the collection and print one page of it
pub async fn list<B>(
    backend: &B,
    state: ViewState,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()>
where
    B: UserBackend + ?Sized,
{
    let users = backend.list_users().await?;
    let engine = ListViewEngine::with_snapshot(users, state);
    let view = engine.view();

    match format {
        OutputFormat::Plain => write!(out, "{}", output::render_page(&view))?,
        OutputFormat::Json => writeln!(out, "{}", output::render_page_json(&view)?)?,
    }
    Ok(())
}

/// Validate and create a user, then refetch
pub async fn add<B>(backend: &B, form: UserForm, out: &mut dyn Write) -> Result<()>
where
    B: UserBackend + ?Sized,
{
    let user = form.into_new_user(Utc::now())?;
    backend.create_user(&user).await?;
    info!(email = %user.email, "User added");

    let total = backend.list_users().await?.len();
    writeln!(out, "Added {} <{}>. {} users in total.", user.name, user.email, total)?;
    Ok(())
}

/// Merge `changes` into a fresh copy of the user, validate, update, refetch
pub async fn edit<B>(
    backend: &B,
    id: &UserId,
    changes: UserChanges,
    out: &mut dyn Write,
) -> Result<()>
where
    B: UserBackend + ?Sized,
{
    if changes.is_empty() {
        return Err(CliError::InvalidArgument(
            "nothing to change; pass --name, --email or --role".to_string(),
        ));
    }

    let users = backend.list_users().await?;
    let existing = users
        .iter()
        .find(|user| &user.id == id)
        .ok_or_else(|| AdminError::not_found("User", id.as_str()))?;

    let update = changes
        .apply(UserForm::from_record(existing))
        .into_update(existing, Utc::now())?;
    backend.update_user(id, &update).await?;
    info!(user_id = %id, "User updated");

    let refreshed = backend.list_users().await?;
    match refreshed.iter().find(|user| &user.id == id) {
        Some(user) => writeln!(out, "Updated {}: {} <{}> ({})", id, user.name, user.email, user.role)?,
        None => writeln!(out, "Updated {id}")?,
    }
    Ok(())
}

/// Delete a user, then refetch
pub async fn delete<B>(backend: &B, id: &UserId, out: &mut dyn Write) -> Result<()>
where
    B: UserBackend + ?Sized,
{
    backend.delete_user(id).await?;
    info!(user_id = %id, "User deleted");

    let total = backend.list_users().await?.len();
    writeln!(out, "Deleted {id}. {total} users remaining.")?;
    Ok(())
}

/// Resolve the page size flag against the configured default
pub fn page_size(flag: Option<usize>, configured: PageSize) -> Result<PageSize> {
    match flag {
        Some(size) => {
            PageSize::try_from(size).map_err(|e| CliError::InvalidArgument(e.to_string()))
        }
        None => Ok(configured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_only_touch_given_fields() {
        let form = UserForm::new("Alice", "alice@example.com", "admin");
        let changed = UserChanges {
            role: Some("viewer".into()),
            ..UserChanges::default()
        }
        .apply(form);

        assert_eq!(changed, UserForm::new("Alice", "alice@example.com", "viewer"));
    }

    #[test]
    fn page_size_flag_overrides_config() {
        assert_eq!(page_size(None, PageSize::Ten).unwrap(), PageSize::Ten);
        assert_eq!(page_size(Some(50), PageSize::Ten).unwrap(), PageSize::Fifty);
        assert!(matches!(
            page_size(Some(3), PageSize::Ten),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
