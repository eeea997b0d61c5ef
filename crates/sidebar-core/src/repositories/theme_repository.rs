//! Theme settings repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::ThemeSettings;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// `None` until the settings record has been saved once.
    async fn load(&self) -> Result<Option<ThemeSettings>, DomainError>;
    async fn save(&self, settings: &ThemeSettings) -> Result<(), DomainError>;
}
