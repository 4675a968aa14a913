//! Account commands: sessions, registration, profile, password recovery.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::Term;
use quire_api::auth::{Credentials, ProfileUpdate, Registration};
use quire_core::model::Role;
use quire_core::ui::notify;
use quire_core::validate;

use super::{PUBLIC, SIGNED_IN, Surface, client_for, explain};

const LOGIN: Surface = Surface {
    route: "/login",
    guard: PUBLIC,
};

const DASHBOARD: Surface = Surface {
    route: "/dashboard",
    guard: SIGNED_IN,
};

const UPDATE_PROFILE: Surface = Surface {
    route: "/updateprofile",
    guard: SIGNED_IN,
};

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => {
            eprint!("password: ");
            Ok(Term::stderr().read_secure_line()?)
        }
    }
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    email: String,
    /// Prompted for interactively when omitted.
    #[arg(long)]
    password: Option<String>,
}

impl LoginArgs {
    pub async fn run(self) -> Result<()> {
        if !validate::valid_email(&self.email) {
            bail!("that does not look like an email address");
        }
        let client = client_for(&LOGIN)?;
        let password = password_or_prompt(self.password)?;

        let session = client
            .login(&Credentials {
                email: self.email,
                password,
            })
            .await
            .map_err(explain)?;

        if let Some(user) = &session.user {
            notify::success(format!("signed in as {} ({})", user.name, user.role));
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LogoutArgs {}

impl LogoutArgs {
    pub fn run(self) -> Result<()> {
        let client = client_for(&LOGIN)?;
        client.logout().map_err(explain)?;
        notify::success("signed out");
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Account role: author or user. Administrator accounts are provisioned
    /// server-side.
    #[arg(long, default_value = "author")]
    role: String,
    #[arg(long)]
    password: Option<String>,
}

impl RegisterArgs {
    pub async fn run(self) -> Result<()> {
        if !validate::valid_name(&self.name) {
            bail!("names are 2-50 letters, spaces, apostrophes or hyphens");
        }
        if !validate::valid_email(&self.email) {
            bail!("that does not look like an email address");
        }
        let role: Role = self.role.parse()?;
        if role == Role::Admin {
            bail!("administrator accounts cannot be self-registered");
        }

        let client = client_for(&LOGIN)?;
        let password = password_or_prompt(self.password)?;
        if !validate::valid_password(&password) {
            bail!("passwords are 6-128 characters with a lowercase, an uppercase and a digit");
        }

        let session = client
            .register(&Registration {
                name: self.name,
                email: self.email,
                password,
                role,
            })
            .await
            .map_err(explain)?;

        if let Some(user) = &session.user {
            notify::success(format!("registered and signed in as {}", user.name));
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct WhoamiArgs {}

impl WhoamiArgs {
    pub async fn run(self) -> Result<()> {
        let client = client_for(&DASHBOARD)?;
        let user = client.me().await.map_err(explain)?;
        println!("{} <{}> ({})", user.name, user.email, user.role);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    cmd: ProfileCommands,
}

#[derive(Debug, Subcommand)]
enum ProfileCommands {
    /// Change the signed-in account's name, email or password.
    Update(ProfileUpdateArgs),
}

#[derive(Debug, Args)]
struct ProfileUpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

impl ProfileArgs {
    pub async fn run(self) -> Result<()> {
        let ProfileCommands::Update(args) = self.cmd;

        if args.name.is_none() && args.email.is_none() && args.password.is_none() {
            bail!("nothing to update: pass --name, --email or --password");
        }
        if let Some(name) = &args.name {
            if !validate::valid_name(name) {
                bail!("names are 2-50 letters, spaces, apostrophes or hyphens");
            }
        }
        if let Some(email) = &args.email {
            if !validate::valid_email(email) {
                bail!("that does not look like an email address");
            }
        }
        if let Some(password) = &args.password {
            if !validate::valid_password(password) {
                bail!("passwords are 6-128 characters with a lowercase, an uppercase and a digit");
            }
        }

        let client = client_for(&UPDATE_PROFILE)?;
        let user = client
            .update_profile(&ProfileUpdate {
                name: args.name,
                email: args.email,
                password: args.password,
            })
            .await
            .map_err(explain)?;

        notify::success(format!("profile updated for {}", user.name));
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ForgotPasswordArgs {
    #[arg(long)]
    email: String,
}

impl ForgotPasswordArgs {
    pub async fn run(self) -> Result<()> {
        if !validate::valid_email(&self.email) {
            bail!("that does not look like an email address");
        }
        let client = client_for(&LOGIN)?;
        client.forgot_password(&self.email).await.map_err(explain)?;
        notify::info("if that address has an account, a reset link is on its way");
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ResetPasswordArgs {
    /// Reset token from the recovery email.
    token: String,
    #[arg(long)]
    password: Option<String>,
}

impl ResetPasswordArgs {
    pub async fn run(self) -> Result<()> {
        let client = client_for(&LOGIN)?;
        let password = password_or_prompt(self.password)?;
        if !validate::valid_password(&password) {
            bail!("passwords are 6-128 characters with a lowercase, an uppercase and a digit");
        }
        client
            .reset_password(&self.token, &password)
            .await
            .map_err(explain)?;
        notify::success("password reset, you can sign in now");
        Ok(())
    }
}
