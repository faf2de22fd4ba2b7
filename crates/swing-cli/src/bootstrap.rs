use anyhow::Context;
use swing_config::SwingConfig;

/// Load layered configuration, including a `.env` in the working tree.
pub fn load_config() -> anyhow::Result<SwingConfig> {
    SwingConfig::load_with_dotenv().context("failed to load swingsync configuration")
}
