use super::intervention::Intervention;
use crate::errors::{AppError, AppResult};

/// A tracked fireman: NIP plus the display name resolved from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub nip: String,
    pub firstname: String,
    pub lastname: String,
}

impl Identity {
    pub fn new(
        nip: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            nip: nip.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }

    /// Resolve the display name of `nip` from a fetched batch.
    ///
    /// The name is looked up in the crew list of the first record, the way
    /// the statistics endpoint returns it (every record lists the fireman the
    /// query was made for).
    pub fn resolve(nip: &str, records: &[Intervention]) -> AppResult<Self> {
        let first = records
            .first()
            .ok_or_else(|| AppError::UnknownIdentity(nip.to_string()))?;

        first
            .crew()
            .iter()
            .find(|m| m.nip == nip)
            .map(|m| Identity::new(nip, m.firstname.clone(), m.lastname.clone()))
            .ok_or_else(|| AppError::UnknownIdentity(nip.to_string()))
    }

    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.firstname, self.lastname, self.nip)
    }
}
