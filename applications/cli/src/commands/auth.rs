/// `register` and `login` commands
use crate::error::{CliError, Result};
use crate::output;
use admin_core::{AuthProvider, Registration};
use std::io::Write;
use tracing::info;

/// Check the form locally, then create the account
///
/// Nothing is sent when the passwords differ.
pub async fn register<A>(auth: &A, registration: Registration, out: &mut dyn Write) -> Result<()>
where
    A: AuthProvider + ?Sized,
{
    registration.validate()?;

    let identity = auth
        .sign_up(&registration.email, &registration.password)
        .await?;
    info!(name = %registration.name, user_id = %identity.user_id, "Registered operator account");

    writeln!(out, "Account created for {}.", identity.email)?;
    writeln!(out, "[{}]", output::affordance(auth.current().as_ref()))?;
    Ok(())
}

/// Sign in and show the resulting affordance
pub async fn login<A>(
    auth: &A,
    email: Option<&str>,
    password: Option<&str>,
    out: &mut dyn Write,
) -> Result<()>
where
    A: AuthProvider + ?Sized,
{
    let (Some(email), Some(password)) = (email, password) else {
        return Err(CliError::InvalidArgument(
            "email and password are required (flags or auth.email/auth.password)".to_string(),
        ));
    };

    let identity = auth.sign_in(email, password).await?;
    writeln!(out, "Signed in as {}.", identity.email)?;
    writeln!(out, "[{}]", output::affordance(auth.current().as_ref()))?;
    Ok(())
}
