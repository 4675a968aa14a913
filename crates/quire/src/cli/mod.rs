//! Command tree and the role gate every command passes through.

mod auth;
mod download;
mod journal;
mod setup;
mod submission;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quire_api::{ApiClient, ApiConfig, ApiError, SessionStore};
use quire_core::access::{self, Access, RouteGuard};
use quire_core::model::Role;

#[derive(Debug, Parser)]
#[command(
    name = "quire",
    version,
    about = "Client for the academic-journal portal",
    propagate_version = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Login(auth::LoginArgs),
    Logout(auth::LogoutArgs),
    Register(auth::RegisterArgs),
    Whoami(auth::WhoamiArgs),
    Profile(auth::ProfileArgs),
    #[command(name = "forgot-password")]
    ForgotPassword(auth::ForgotPasswordArgs),
    #[command(name = "reset-password")]
    ResetPassword(auth::ResetPasswordArgs),
    #[command(alias = "j")]
    Journal(journal::JournalArgs),
    #[command(alias = "s")]
    Submission(submission::SubmissionArgs),
    Completions(setup::CompletionsArgs),
}

impl App {
    pub async fn run(self) -> Result<()> {
        match self.cmd {
            Commands::Login(args) => args.run().await,
            Commands::Logout(args) => args.run(),
            Commands::Register(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
            Commands::Profile(args) => args.run().await,
            Commands::ForgotPassword(args) => args.run().await,
            Commands::ResetPassword(args) => args.run().await,
            Commands::Journal(args) => args.run().await,
            Commands::Submission(args) => args.run().await,
            Commands::Completions(args) => args.run(),
        }
    }
}

/// One protected (or public) surface: the logical route the command acts
/// for, plus the roles allowed on it.
pub(crate) struct Surface {
    pub route: &'static str,
    pub guard: RouteGuard,
}

pub(crate) const ADMIN: RouteGuard = RouteGuard::new(&[Role::Admin]);
pub(crate) const CONTRIBUTORS: RouteGuard = RouteGuard::new(&[Role::Admin, Role::Author]);
pub(crate) const SIGNED_IN: RouteGuard = RouteGuard::new(&[Role::Admin, Role::Author, Role::User]);
pub(crate) const PUBLIC: RouteGuard = RouteGuard::public();

/// Run the authorization gate for `surface` and hand back a client bound to
/// its route. The gate's redirects become actionable messages here, since a
/// terminal has no login page to navigate to.
pub(crate) fn client_for(surface: &Surface) -> Result<ApiClient> {
    let store = SessionStore::open_default()?;
    let session = store.load();

    match access::authorize(session.user.as_ref(), &surface.guard) {
        Access::Allow => {}
        Access::RedirectToLogin => {
            anyhow::bail!("you need to sign in first: run `quire login`")
        }
        Access::RedirectToUnauthorized => {
            anyhow::bail!("your account does not have permission to do this")
        }
    }

    Ok(ApiClient::new(ApiConfig::load(), store)?.for_route(surface.route))
}

/// Attach a recovery hint where the taxonomy calls for one.
pub(crate) fn explain(err: ApiError) -> anyhow::Error {
    match &err {
        ApiError::Unauthorized {
            redirect_to_login: true,
        } => anyhow::anyhow!("your session has expired, run `quire login`"),
        _ => anyhow::Error::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use quire_core::model::User;

    #[test]
    fn command_tree_is_well_formed() {
        App::command().debug_assert();
    }

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.org".into(),
            role,
        }
    }

    #[test]
    fn guard_tiers_nest_as_expected() {
        for role in [Role::Admin, Role::Author, Role::User] {
            assert_eq!(access::authorize(Some(&user(role)), &PUBLIC), Access::Allow);
            assert_eq!(
                access::authorize(Some(&user(role)), &SIGNED_IN),
                Access::Allow
            );
        }
        assert_eq!(
            access::authorize(Some(&user(Role::User)), &CONTRIBUTORS),
            Access::RedirectToUnauthorized
        );
        assert_eq!(
            access::authorize(Some(&user(Role::Author)), &ADMIN),
            Access::RedirectToUnauthorized
        );
        assert_eq!(access::authorize(None, &ADMIN), Access::RedirectToLogin);
    }
}
