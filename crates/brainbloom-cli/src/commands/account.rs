use anyhow::{Result, bail};
use brainbloom_core::user::{AuthService, IdentityProvider, LoginCredentials};
use colored::Colorize;

pub async fn login(
    auth: &dyn AuthService,
    google: bool,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let session = if google {
        println!("{}", "Signing in with Google...".bright_black());
        auth.login_with_google().await?
    } else {
        let (Some(email), Some(password)) = (email, password) else {
            bail!("--email and --password are required unless --google is given");
        };
        println!("{}", "Signing in...".bright_black());
        auth.login(LoginCredentials::new(email, password)).await?
    };

    println!(
        "{} {} <{}>",
        "Signed in as".bright_green(),
        session.user.name.bold(),
        session.user.email
    );
    Ok(())
}

pub fn logout(auth: &dyn AuthService) -> Result<()> {
    auth.logout()?;
    println!("{}", "Signed out.".bright_green());
    Ok(())
}

pub fn whoami(identity: &dyn IdentityProvider) {
    match identity.current_user() {
        Some(user) => println!("{} <{}> (id {})", user.name.bold(), user.email, user.id),
        None => println!("{}", "Not signed in.".bright_black()),
    }
}
