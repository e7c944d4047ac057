use super::{authorize_moderator, get_place::place_details, non_empty, prelude::*, PlaceDetails};
use crate::visibility;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilter {
    pub name: Option<String>,
    pub categories: Option<String>,
    pub status: Vec<ModerationStatus>,
    pub owner: Option<Id>,
    pub search: Option<String>,
    pub order: Option<SortOrder<PlaceSortField>>,
    pub pagination: Pagination,
}

pub fn query_places<R>(
    repo: &R,
    requester: Option<&User>,
    filter: PlaceFilter,
) -> Result<Vec<PlaceDetails>>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    let PlaceFilter {
        name,
        categories,
        status,
        owner,
        search,
        order,
        pagination,
    } = filter;
    let permitted = visibility::listed_statuses(requester, owner.as_ref());
    let query = PlaceQuery {
        name: non_empty(name),
        categories: non_empty(categories),
        search: non_empty(search),
        owner,
        favorite_of: None,
        status: visibility::restrict_statuses(permitted, &status),
        bbox: None,
        order: order.unwrap_or_default(),
        pagination,
    };
    load_details(repo, requester, &query)
}

/// Pending places, oldest first.
pub fn place_moderation_queue<R>(
    repo: &R,
    requester: Option<&User>,
    pagination: Pagination,
) -> Result<Vec<PlaceDetails>>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    authorize_moderator(requester)?;
    let query = PlaceQuery {
        status: visibility::queued_statuses().to_vec(),
        order: SortOrder::asc(PlaceSortField::CreatedAt),
        pagination,
        ..Default::default()
    };
    load_details(repo, requester, &query)
}

pub(crate) fn load_details<R>(
    repo: &R,
    requester: Option<&User>,
    query: &PlaceQuery,
) -> Result<Vec<PlaceDetails>>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    if query.status.is_empty() {
        return Ok(vec![]);
    }
    repo.query_places(query)?
        .into_iter()
        .map(|place| place_details(repo, requester, place))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use mythmap_entities::builders::*;
    use ModerationStatus::*;

    fn names(places: &[PlaceDetails]) -> Vec<&str> {
        places.iter().map(|p| p.place.name.as_str()).collect()
    }

    fn setup() -> (MockDb, User, User) {
        let db = MockDb::default();
        let alice = db.add_user(User::build().username("alice").finish());
        let bob = db.add_user(User::build().username("bob").finish());
        for (name, owner, status) in [
            ("a-approved", &alice, Approved),
            ("b-pending", &alice, Pending),
            ("c-rejected", &alice, Rejected),
            ("d-approved", &bob, Approved),
        ] {
            db.add_place(
                Place::build()
                    .name(name)
                    .owner(owner.id.as_str())
                    .status(status)
                    .finish(),
            );
        }
        (db, alice, bob)
    }

    #[test]
    fn anonymous_listing_returns_only_approved_places() {
        let (db, _, _) = setup();
        let places = query_places(&db, None, Default::default()).unwrap();
        assert_eq!(vec!["a-approved", "d-approved"], names(&places));
    }

    #[test]
    fn moderators_list_all_places() {
        let (db, _, _) = setup();
        let moderator = db.add_user(User::build().role(Role::Moderator).finish());
        let places = query_places(&db, Some(&moderator), Default::default()).unwrap();
        assert_eq!(4, places.len());
    }

    #[test]
    fn owners_see_all_their_places_when_filtering_by_owner() {
        let (db, alice, bob) = setup();
        let filter = PlaceFilter {
            owner: Some(alice.id.clone()),
            ..Default::default()
        };
        let places = query_places(&db, Some(&alice), filter.clone()).unwrap();
        assert_eq!(vec!["a-approved", "b-pending", "c-rejected"], names(&places));

        let places = query_places(&db, Some(&bob), filter.clone()).unwrap();
        assert_eq!(vec!["a-approved"], names(&places));

        let places = query_places(&db, None, filter).unwrap();
        assert_eq!(vec!["a-approved"], names(&places));
    }

    #[test]
    fn requested_status_is_restricted() {
        let (db, alice, _) = setup();
        let filter = PlaceFilter {
            status: vec![Pending],
            ..Default::default()
        };
        assert!(query_places(&db, None, filter.clone()).unwrap().is_empty());
        assert!(query_places(&db, Some(&alice), filter.clone())
            .unwrap()
            .is_empty());
        let filter = PlaceFilter {
            owner: Some(alice.id.clone()),
            ..filter
        };
        let places = query_places(&db, Some(&alice), filter).unwrap();
        assert_eq!(vec!["b-pending"], names(&places));
    }

    #[test]
    fn search_and_order() {
        let (db, _, _) = setup();
        let filter = PlaceFilter {
            search: Some("APPROVED".into()),
            order: Some(SortOrder::desc(PlaceSortField::Name)),
            ..Default::default()
        };
        let places = query_places(&db, None, filter).unwrap();
        assert_eq!(vec!["d-approved", "a-approved"], names(&places));
    }

    #[test]
    fn moderation_queue_contains_pending_places() {
        let (db, alice, _) = setup();
        assert!(matches!(
            place_moderation_queue(&db, None, Default::default()),
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            place_moderation_queue(&db, Some(&alice), Default::default()),
            Err(Error::Forbidden)
        ));
        let admin = db.add_user(User::build().role(Role::Admin).finish());
        let places = place_moderation_queue(&db, Some(&admin), Default::default()).unwrap();
        assert_eq!(vec!["b-pending"], names(&places));
    }
}
