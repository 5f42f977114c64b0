use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Email a sign-in link and code.
    Login(AuthLoginArgs),
    /// Finish sign-in with the code or link from the email.
    Verify(AuthVerifyArgs),
    /// Sign out; local entries stay.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Address to send the link to.
    pub email: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthVerifyArgs {
    /// Address the link was sent to.
    pub email: String,
    /// The 6-digit code, the emailed link, or the page address the link led to.
    pub code_or_link: String,
}
