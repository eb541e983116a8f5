use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Breathometer Configuration

[insights]
# Ask a chat-completions model for weekly insights; built-in rules are used
# whenever it is disabled, unreachable or answers with invalid JSON.
remote_enabled = true
endpoint = "https://api.groq.com/openai/v1/chat/completions"
model = "llama3-70b-8192"
# Environment variable holding the API key
api_key_env = "GROQ_API_KEY"
timeout_secs = 10
temperature = 0.3
max_tokens = 700

[simulation]
# Uncomment for a reproducible weekly history
# seed = 42

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)
}
