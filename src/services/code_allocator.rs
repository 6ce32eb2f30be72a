//! Short code allocation
//!
//! Hands out codes that were free at the moment of the check. The check is
//! not atomic with the later insert; the store's unique constraint settles
//! any race and the caller retries.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::ShortenerConfig;
use crate::errors::{Result, TinylinkError};
use crate::storage::LinkRepository;
use crate::utils::{MAX_SHORT_CODE_LEN, generate_random_code, is_valid_slug};

/// Produces a candidate code of the given length
pub type CodeGenerator = fn(usize) -> String;

pub struct CodeAllocator {
    repo: Arc<dyn LinkRepository>,
    code_length: usize,
    max_attempts: u32,
    generator: CodeGenerator,
}

impl CodeAllocator {
    pub fn new(repo: Arc<dyn LinkRepository>, config: &ShortenerConfig) -> Self {
        Self::with_generator(repo, config, generate_random_code)
    }

    pub fn with_generator(
        repo: Arc<dyn LinkRepository>,
        config: &ShortenerConfig,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            repo,
            code_length: config.code_length,
            max_attempts: config.max_generate_attempts,
            generator,
        }
    }

    /// Claim `custom` if given (and non-empty), otherwise generate a free code
    pub async fn allocate(&self, custom: Option<&str>) -> Result<String> {
        match custom.filter(|c| !c.is_empty()) {
            Some(code) => self.claim_custom(code).await,
            None => self.generate_unused().await,
        }
    }

    async fn claim_custom(&self, code: &str) -> Result<String> {
        if !is_valid_slug(code) {
            return Err(TinylinkError::invalid_code(format!(
                "Invalid custom code '{}'. Use 1-{} letters, digits, '-' or '_'",
                code, MAX_SHORT_CODE_LEN
            )));
        }

        if self.repo.find_by_code(code).await?.is_some() {
            return Err(TinylinkError::code_in_use(format!(
                "Custom code '{}' already in use",
                code
            )));
        }

        Ok(code.to_string())
    }

    async fn generate_unused(&self) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let code = (self.generator)(self.code_length);
            if self.repo.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
            debug!(
                "Generated code '{}' collided (attempt {}/{})",
                code, attempt, self.max_attempts
            );
        }

        error!(
            "No free short code after {} attempts at length {}",
            self.max_attempts, self.code_length
        );
        Err(TinylinkError::code_space_exhausted(format!(
            "Could not generate a unique short code after {} attempts",
            self.max_attempts
        )))
    }
}
