use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "turnstile", about = "User sign-up and sign-in service")]
pub struct Cli {
    /// Path to a settings file; defaults to settings/dev.toml or settings/release.toml.
    #[arg(long)]
    pub settings: Option<String>,
}
