use anyhow::{Context, Result};
use std::env;

/// Deployment configuration, injected through the Lambda environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub books_table: String,
    pub reading_lists_table: String,
    /// User attributed to requests that carry no `userId`. There is no auth
    /// layer in front of this API, so every anonymous caller shares it.
    pub default_user_id: String,
}

const DEFAULT_USER_ID: &str = "1";

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            books_table: env::var("BOOKS_TABLE_NAME").context("BOOKS_TABLE_NAME must be set")?,
            reading_lists_table: env::var("READING_LISTS_TABLE_NAME")
                .context("READING_LISTS_TABLE_NAME must be set")?,
            default_user_id: env::var("DEFAULT_USER_ID")
                .unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
        })
    }
}
