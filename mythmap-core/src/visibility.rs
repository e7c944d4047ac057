//! Role-scoped predicates over the moderation status.
//!
//! | requester       | lookup   | list     | list of own items | change of own items | moderation queue |
//! |-----------------|----------|----------|-------------------|---------------------|------------------|
//! | anonymous       | approved | approved | approved          | -                   | -                |
//! | user            | approved | approved | all               | all                 | -                |
//! | moderator/admin | all      | all      | all               | all                 | pending          |

use crate::entities::*;

use ModerationStatus::*;

const ALL: &[ModerationStatus] = &[Rejected, Pending, Approved];
const APPROVED: &[ModerationStatus] = &[Approved];
const PENDING: &[ModerationStatus] = &[Pending];

fn is_moderator(requester: Option<&User>) -> bool {
    requester.map(User::can_moderate).unwrap_or(false)
}

/// Statuses of single items the requester may look up.
pub fn visible_statuses(requester: Option<&User>) -> &'static [ModerationStatus] {
    if is_moderator(requester) {
        ALL
    } else {
        APPROVED
    }
}

/// Statuses of items that are listed for the requester.
///
/// Users that filter the list by their own id see all their
/// items independent of the status.
pub fn listed_statuses(
    requester: Option<&User>,
    filtered_by_user: Option<&Id>,
) -> &'static [ModerationStatus] {
    match requester {
        Some(user) if user.can_moderate() => ALL,
        Some(user) if filtered_by_user == Some(&user.id) => ALL,
        _ => APPROVED,
    }
}

/// Statuses of items in the moderation queue.
pub fn queued_statuses() -> &'static [ModerationStatus] {
    PENDING
}

/// Intersect the requested statuses with the permitted ones.
///
/// No requested statuses means all permitted statuses.
pub fn restrict_statuses(
    permitted: &[ModerationStatus],
    requested: &[ModerationStatus],
) -> Vec<ModerationStatus> {
    if requested.is_empty() {
        return permitted.to_vec();
    }
    permitted
        .iter()
        .filter(|s| requested.contains(s))
        .copied()
        .collect()
}

pub fn is_visible(requester: Option<&User>, moderation: &Moderation) -> bool {
    visible_statuses(requester).contains(&moderation.status)
}

/// Owners reach their own items independent of the status,
/// e.g. to edit or delete them while they are pending.
pub fn is_accessible(requester: Option<&User>, owner: &Id, moderation: &Moderation) -> bool {
    match requester {
        Some(user) if &user.id == owner => true,
        _ => is_visible(requester, moderation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mythmap_entities::builders::*;

    fn moderation(status: ModerationStatus) -> Moderation {
        Moderation {
            status,
            rejection_reason: None,
        }
    }

    #[test]
    fn anonymous_requesters_only_see_approved_items() {
        assert!(is_visible(None, &moderation(Approved)));
        assert!(!is_visible(None, &moderation(Pending)));
        assert!(!is_visible(None, &moderation(Rejected)));
        assert_eq!(APPROVED, listed_statuses(None, None));
        assert_eq!(APPROVED, listed_statuses(None, Some(&Id::new())));
    }

    #[test]
    fn users_see_their_own_items_when_filtering_by_owner() {
        let user = User::build().finish();
        let other = User::build().finish();
        assert_eq!(APPROVED, listed_statuses(Some(&user), None));
        assert_eq!(APPROVED, listed_statuses(Some(&user), Some(&other.id)));
        assert_eq!(ALL, listed_statuses(Some(&user), Some(&user.id)));
        assert!(!is_visible(Some(&user), &moderation(Pending)));
    }

    #[test]
    fn moderators_and_admins_see_everything() {
        for role in [Role::Moderator, Role::Admin] {
            let user = User::build().role(role).finish();
            assert_eq!(ALL, listed_statuses(Some(&user), None));
            assert!(is_visible(Some(&user), &moderation(Rejected)));
            assert!(is_visible(Some(&user), &moderation(Pending)));
        }
    }

    #[test]
    fn owners_access_their_own_items_in_any_status() {
        let owner = User::build().finish();
        let other = User::build().finish();
        let moderator = User::build().role(Role::Moderator).finish();
        for status in [Pending, Rejected] {
            let moderation = moderation(status);
            assert!(is_accessible(Some(&owner), &owner.id, &moderation));
            assert!(is_accessible(Some(&moderator), &owner.id, &moderation));
            assert!(!is_accessible(Some(&other), &owner.id, &moderation));
            assert!(!is_accessible(None, &owner.id, &moderation));
        }
        assert!(is_accessible(Some(&other), &owner.id, &moderation(Approved)));
    }

    #[test]
    fn intersect_requested_statuses() {
        assert_eq!(vec![Approved], restrict_statuses(APPROVED, &[]));
        assert!(restrict_statuses(APPROVED, &[Pending]).is_empty());
        assert_eq!(
            vec![Pending, Approved],
            restrict_statuses(ALL, &[Approved, Pending])
        );
    }
}
