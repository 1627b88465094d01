use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::{DomainError, DomainResult};

pub const MAX_ACCOUNT_ID_LEN: usize = 256;

/// Opaque identifier naming one balance record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(DomainError::InvalidAccount(
                "account cannot be empty".to_string(),
            ));
        }

        if raw.chars().count() > MAX_ACCOUNT_ID_LEN {
            return Err(DomainError::InvalidAccount(format!(
                "account cannot exceed {MAX_ACCOUNT_ID_LEN} characters"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
