use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};
use thiserror::Error;

pub type ModerationStatusPrimitive = i16;

/// Review state of user submitted content.
#[rustfmt::skip]
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    FromPrimitive, ToPrimitive, EnumIter, EnumCount, EnumString, AsRefStr, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModerationStatus {
    Rejected = -1,
    #[default]
    Pending  =  0,
    Approved =  1,
}

#[derive(Debug, Error)]
#[error("Invalid moderation status primitive: {0}")]
pub struct InvalidModerationStatusPrimitive(ModerationStatusPrimitive);

impl TryFrom<ModerationStatusPrimitive> for ModerationStatus {
    type Error = InvalidModerationStatusPrimitive;
    fn try_from(from: ModerationStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidModerationStatusPrimitive(from))
    }
}

impl From<ModerationStatus> for ModerationStatusPrimitive {
    fn from(from: ModerationStatus) -> Self {
        // All variants fit into an i16
        from.to_i16().unwrap_or_default()
    }
}

/// The moderation state of a single item.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Moderation {
    pub status: ModerationStatus,
    pub rejection_reason: Option<String>,
}

impl Moderation {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn is_approved(&self) -> bool {
        self.status == ModerationStatus::Approved
    }

    pub fn approve(&mut self) {
        self.status = ModerationStatus::Approved;
        self.rejection_reason = None;
    }

    pub fn reject(&mut self, reason: Option<String>) {
        self.status = ModerationStatus::Rejected;
        self.rejection_reason = reason
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());
    }

    /// An approved item has to be reviewed again after its owner changed it.
    ///
    /// Returns `true` if the status has been reset.
    pub fn reset_after_owner_edit(&mut self) -> bool {
        if self.is_approved() {
            self.status = ModerationStatus::Pending;
            self.rejection_reason = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn status_primitives() {
        for status in ModerationStatus::iter() {
            let prim = ModerationStatusPrimitive::from(status);
            assert_eq!(status, ModerationStatus::try_from(prim).unwrap());
        }
        assert!(ModerationStatus::try_from(2).is_err());
        assert!(ModerationStatus::try_from(-2).is_err());
    }

    #[test]
    fn parse_and_print_status() {
        assert_eq!(Ok(ModerationStatus::Approved), "approved".parse());
        assert_eq!(Ok(ModerationStatus::Pending), "Pending".parse());
        assert_eq!(Ok(ModerationStatus::Rejected), "REJECTED".parse());
        assert!("archived".parse::<ModerationStatus>().is_err());
        assert_eq!("rejected", ModerationStatus::Rejected.to_string());
        assert_eq!("approved", ModerationStatus::Approved.as_ref());
    }

    #[test]
    fn approve_clears_reason() {
        let mut m = Moderation::pending();
        m.reject(Some("  spam ".into()));
        assert_eq!(ModerationStatus::Rejected, m.status);
        assert_eq!(Some("spam"), m.rejection_reason.as_deref());
        m.approve();
        assert!(m.is_approved());
        assert_eq!(None, m.rejection_reason);
    }

    #[test]
    fn reject_without_reason() {
        let mut m = Moderation::pending();
        m.approve();
        m.reject(Some("   ".into()));
        assert_eq!(ModerationStatus::Rejected, m.status);
        assert_eq!(None, m.rejection_reason);
        m.reject(None);
        assert_eq!(None, m.rejection_reason);
    }

    #[test]
    fn owner_edit_of_approved_item() {
        let mut m = Moderation::pending();
        m.approve();
        assert!(m.reset_after_owner_edit());
        assert_eq!(ModerationStatus::Pending, m.status);
    }

    #[test]
    fn owner_edit_keeps_pending_and_rejected() {
        let mut m = Moderation::pending();
        assert!(!m.reset_after_owner_edit());
        assert_eq!(ModerationStatus::Pending, m.status);

        m.reject(Some("incomplete".into()));
        assert!(!m.reset_after_owner_edit());
        assert_eq!(ModerationStatus::Rejected, m.status);
        assert_eq!(Some("incomplete"), m.rejection_reason.as_deref());
    }
}
