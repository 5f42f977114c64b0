use anyhow::Context;
use lift_config::LiftConfig;

/// Project-local dotenv file, loaded before the working directory's `.env`.
const PROJECT_DOTENV: &str = ".liftlog/.env";

pub fn load_config() -> anyhow::Result<LiftConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let project_env = cwd.join(PROJECT_DOTENV);
    if project_env.exists() {
        dotenvy::from_path(&project_env)
            .with_context(|| format!("failed to load dotenv file at {}", project_env.display()))?;
    }

    LiftConfig::load_with_dotenv().context("failed to load liftlog configuration")
}
