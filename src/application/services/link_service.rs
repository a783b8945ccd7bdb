//! Short link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_custom_code};
use crate::utils::url_validator::validate_target_url;

/// Validity applied when a request does not specify one, in minutes.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Upper bound on a requested validity: one year, in minutes.
pub const MAX_VALIDITY_MINUTES: i64 = 525_600;

/// Length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Insert attempts for generated codes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Checks a requested validity against `1..=MAX_VALIDITY_MINUTES`.
///
/// # Errors
///
/// Returns [`AppError::InvalidValidity`] if `minutes` is out of range.
pub fn check_validity(minutes: i64) -> Result<i64, AppError> {
    if (1..=MAX_VALIDITY_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(AppError::invalid_validity(minutes, MAX_VALIDITY_MINUTES))
    }
}

/// Tunables for link creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    pub default_validity_minutes: i64,
    pub code_length: usize,
    pub max_attempts: usize,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Input for [`LinkService::create_short_link`].
#[derive(Debug, Clone, Default)]
pub struct CreateShortLink {
    pub url: String,
    /// Minutes the link stays resolvable. Defaults to the policy value.
    pub validity: Option<i64>,
    /// Custom code. Generated when absent or empty.
    pub shortcode: Option<String>,
}

/// Service for creating and resolving short links.
///
/// All input validation happens before the repository is touched. Code
/// uniqueness is left to the repository's atomic insert; collisions on
/// generated codes are retried up to [`LinkPolicy::max_attempts`] times.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    clock: Arc<dyn Clock>,
    policy: LinkPolicy,
    generate: fn(usize) -> String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        clock: Arc<dyn Clock>,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
            generate: generate_code,
        }
    }

    /// Replaces the random code source.
    #[cfg(test)]
    fn with_code_source(mut self, generate: fn(usize) -> String) -> Self {
        self.generate = generate;
        self
    }

    /// Creates a short link.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is empty or not an absolute
    ///   `http`/`https` URL with a host
    /// - [`AppError::InvalidValidity`] if the validity is outside `1..=525600`
    /// - [`AppError::InvalidShortcode`] if the custom code is malformed
    /// - [`AppError::ShortcodeTaken`] if the custom code already exists
    /// - [`AppError::CodeGenerationExhausted`] if every generated code collided
    /// - [`AppError::Persistence`] on storage errors
    pub async fn create_short_link(&self, request: CreateShortLink) -> Result<ShortLink, AppError> {
        let CreateShortLink {
            url,
            validity,
            shortcode,
        } = request;

        validate_target_url(&url).map_err(|e| {
            warn!(url = %url, reason = %e, "Rejected target URL");
            AppError::invalid_url(e.to_string())
        })?;

        let validity = self.resolve_validity(validity)?;

        let shortcode = shortcode.filter(|code| !code.is_empty());
        if let Some(code) = &shortcode {
            validate_custom_code(code).inspect_err(|e| {
                warn!(shortcode = %code, reason = %e, "Rejected custom shortcode");
            })?;
        }

        let created_at = self.clock.now().trunc_subsecs(0);
        let expires_at = created_at + Duration::minutes(validity);

        let link = match shortcode {
            Some(code) => {
                info!(shortcode = %code, "Using custom shortcode");
                self.repository
                    .create(NewShortLink {
                        code,
                        target_url: url,
                        expires_at,
                        created_at,
                    })
                    .await
                    .inspect_err(|e| {
                        if let AppError::ShortcodeTaken { code } = e {
                            warn!(shortcode = %code, "Shortcode already exists");
                        }
                    })?
            }
            None => {
                self.create_with_generated_code(url, created_at, expires_at)
                    .await?
            }
        };

        info!(
            shortcode = %link.code,
            target = %link.target_url,
            expires_at = %link.expires_at,
            "Short link created"
        );

        Ok(link)
    }

    /// Resolves a code for redirection and records the access.
    ///
    /// The returned link's `access_count` includes this access.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown
    /// - [`AppError::Expired`] if the link's expiry has been reached
    /// - [`AppError::Persistence`] on storage errors
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let mut link = self.get_link(code).await?;

        if link.is_expired_at(self.clock.now()) {
            warn!(shortcode = %code, expires_at = %link.expires_at, "Short link expired");
            return Err(AppError::Expired {
                code: code.to_string(),
            });
        }

        self.repository.record_access(code).await?;
        link.access_count += 1;

        info!(
            shortcode = %code,
            target = %link.target_url,
            access_count = link.access_count,
            "Redirecting"
        );

        Ok(link)
    }

    /// Retrieves a link by code without recording an access.
    ///
    /// Expired links are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| {
                warn!(shortcode = %code, "Short link not found");
                AppError::not_found(code)
            })
    }

    /// Returns true if the link is expired according to the service clock.
    pub fn is_expired(&self, link: &ShortLink) -> bool {
        link.is_expired_at(self.clock.now())
    }

    /// Returns true if the underlying store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    fn resolve_validity(&self, validity: Option<i64>) -> Result<i64, AppError> {
        match validity {
            None => Ok(self.policy.default_validity_minutes),
            Some(minutes) => check_validity(minutes).inspect_err(|_| {
                warn!(validity = minutes, "Rejected validity period");
            }),
        }
    }

    /// Inserts under freshly generated codes until one is free.
    async fn create_with_generated_code(
        &self,
        target_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<ShortLink, AppError> {
        for attempt in 1..=self.policy.max_attempts {
            let code = (self.generate)(self.policy.code_length);
            if is_reserved(&code) {
                debug!(shortcode = %code, attempt, "Generated shortcode is reserved");
                continue;
            }

            let new_link = NewShortLink {
                code,
                target_url: target_url.clone(),
                expires_at,
                created_at,
            };

            match self.repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::ShortcodeTaken { code }) => {
                    debug!(shortcode = %code, attempt, "Generated shortcode collided");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            attempts = self.policy.max_attempts,
            "Failed to generate a unique shortcode"
        );
        Err(AppError::CodeGenerationExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}
