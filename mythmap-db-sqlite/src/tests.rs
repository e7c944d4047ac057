use super::*;
use mythmap_core::{entities::*, repositories::*};
use mythmap_entities::builders::*;

fn connections() -> Connections {
    let connections = Connections::init(":memory:", 1).unwrap();
    run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    connections
}

fn all_statuses() -> Vec<ModerationStatus> {
    vec![
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ]
}

fn place_query(status: Vec<ModerationStatus>) -> PlaceQuery {
    PlaceQuery {
        status,
        ..Default::default()
    }
}

#[test]
fn migrations_are_applied_only_once() {
    let connections = connections();
    run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    let db = connections.exclusive().unwrap();
    assert!(!db
        .sqlite_conn()
        .has_pending_migration(MIGRATIONS)
        .unwrap());
    assert!(db.query_places(&place_query(all_statuses())).unwrap().is_empty());
}

#[test]
fn create_update_and_get_place() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let owner = User::build().finish();
    db.create_user(&owner).unwrap();
    let mut place = Place::build()
        .name("Old Mill")
        .description("haunted")
        .categories("ghosts")
        .owner(owner.id.as_str())
        .pos(MapPoint::from_lat_lng_deg(52.5, 13.4))
        .finish();
    db.create_place(&place).unwrap();
    assert_eq!(place, db.get_place(place.id.as_str()).unwrap());

    place.name = "New Mill".into();
    place.categories = None;
    place.moderation.reject(Some("blurry".into()));
    db.update_place(&place).unwrap();
    let loaded = db.get_place(place.id.as_str()).unwrap();
    assert_eq!("New Mill", loaded.name);
    assert_eq!(None, loaded.categories);
    assert_eq!(ModerationStatus::Rejected, loaded.moderation.status);
    assert_eq!(Some("blurry"), loaded.moderation.rejection_reason.as_deref());

    assert!(matches!(
        db.get_place("missing"),
        Err(mythmap_core::RepoError::NotFound)
    ));
    assert_eq!(1, db.count_places().unwrap());
}

#[test]
fn query_places_by_status_and_text() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let owner = User::build().finish();
    db.create_user(&owner).unwrap();
    for (name, status, categories) in [
        ("Lighthouse", ModerationStatus::Approved, "sea"),
        ("Lake", ModerationStatus::Pending, "water"),
        ("Loch 50%", ModerationStatus::Approved, "water, monster"),
    ] {
        db.create_place(
            &Place::build()
                .name(name)
                .status(status)
                .categories(categories)
                .owner(owner.id.as_str())
                .finish(),
        )
        .unwrap();
    }

    let approved = db
        .query_places(&place_query(vec![ModerationStatus::Approved]))
        .unwrap();
    assert_eq!(
        vec!["Lighthouse", "Loch 50%"],
        approved.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
    );
    assert!(db.query_places(&place_query(vec![])).unwrap().is_empty());

    let query = PlaceQuery {
        search: Some("WATER".into()),
        ..place_query(all_statuses())
    };
    assert_eq!(2, db.query_places(&query).unwrap().len());

    let query = PlaceQuery {
        name: Some("50%".into()),
        ..place_query(all_statuses())
    };
    assert_eq!(1, db.query_places(&query).unwrap().len());
    let query = PlaceQuery {
        name: Some("5_%".into()),
        ..place_query(all_statuses())
    };
    assert!(db.query_places(&query).unwrap().is_empty());

    let query = PlaceQuery {
        order: SortOrder::desc(PlaceSortField::Name),
        pagination: Pagination {
            offset: Some(1),
            limit: Some(1),
        },
        ..place_query(all_statuses())
    };
    let places = db.query_places(&query).unwrap();
    assert_eq!(1, places.len());
    assert_eq!("Lighthouse", places[0].name);
}

#[test]
fn query_places_in_bbox_across_the_antimeridian() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let owner = User::build().finish();
    db.create_user(&owner).unwrap();
    for (name, lng) in [("east", 179.5), ("west", -179.5), ("greenwich", 0.0)] {
        db.create_place(
            &Place::build()
                .name(name)
                .owner(owner.id.as_str())
                .pos(MapPoint::from_lat_lng_deg(10.0, lng))
                .finish(),
        )
        .unwrap();
    }
    let bbox = MapBbox::new(
        MapPoint::from_lat_lng_deg(0.0, 179.0),
        MapPoint::from_lat_lng_deg(20.0, -179.0),
    );
    assert!(bbox.is_inverse());
    let query = PlaceQuery {
        bbox: Some(bbox),
        ..place_query(all_statuses())
    };
    let names: Vec<_> = db
        .query_places(&query)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(vec!["east", "west"], names);
}

#[test]
fn favorites_of_a_user() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let user = User::build().finish();
    db.create_user(&user).unwrap();
    let a = Place::build().name("a").owner(user.id.as_str()).finish();
    let b = Place::build().name("b").owner(user.id.as_str()).finish();
    db.create_place(&a).unwrap();
    db.create_place(&b).unwrap();

    db.add_favorite(b.id.as_str(), user.id.as_str()).unwrap();
    assert!(db.is_favorite(b.id.as_str(), user.id.as_str()).unwrap());
    assert!(!db.is_favorite(a.id.as_str(), user.id.as_str()).unwrap());
    assert!(matches!(
        db.add_favorite(b.id.as_str(), user.id.as_str()),
        Err(mythmap_core::RepoError::AlreadyExists)
    ));

    let query = PlaceQuery {
        favorite_of: Some(user.id.clone()),
        ..place_query(all_statuses())
    };
    assert_eq!(vec![b.clone()], db.query_places(&query).unwrap());

    assert!(db.remove_favorite(b.id.as_str(), user.id.as_str()).unwrap());
    assert!(!db.remove_favorite(b.id.as_str(), user.id.as_str()).unwrap());
}

#[test]
fn only_one_note_per_place_and_user() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let user = User::build().finish();
    db.create_user(&user).unwrap();
    let place = Place::build().owner(user.id.as_str()).finish();
    db.create_place(&place).unwrap();
    let note = Note::build()
        .place(place.id.as_str())
        .user(user.id.as_str())
        .rating(4)
        .finish();
    db.create_note(&note).unwrap();
    let duplicate = Note::build()
        .place(place.id.as_str())
        .user(user.id.as_str())
        .finish();
    assert!(matches!(
        db.create_note(&duplicate),
        Err(mythmap_core::RepoError::AlreadyExists)
    ));
    assert_eq!(
        Some(note),
        db.try_get_note_of_user(place.id.as_str(), user.id.as_str())
            .unwrap()
    );
}

#[test]
fn rating_range_excludes_unrated_notes() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let owner = User::build().finish();
    db.create_user(&owner).unwrap();
    let place = Place::build().owner(owner.id.as_str()).finish();
    db.create_place(&place).unwrap();
    for rating in [None, Some(2), Some(5)] {
        let user = User::build().finish();
        db.create_user(&user).unwrap();
        let mut note = Note::build()
            .place(place.id.as_str())
            .user(user.id.as_str())
            .status(ModerationStatus::Approved);
        if let Some(rating) = rating {
            note = note.rating(rating);
        }
        db.create_note(&note.finish()).unwrap();
    }
    let query = NoteQuery {
        status: all_statuses(),
        rating_min: Some(RatingValue::try_from(1).unwrap()),
        order: SortOrder::desc(NoteSortField::Rating),
        ..Default::default()
    };
    let ratings: Vec<_> = db
        .query_notes(&query)
        .unwrap()
        .into_iter()
        .map(|n| n.rating.map(i64::from))
        .collect();
    assert_eq!(vec![Some(5), Some(2)], ratings);

    let query = NoteQuery {
        status: all_statuses(),
        ..Default::default()
    };
    assert_eq!(3, db.query_notes(&query).unwrap().len());
}

#[test]
fn delete_place_with_all_dependents() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let user = User::build().finish();
    db.create_user(&user).unwrap();
    let place = Place::build().owner(user.id.as_str()).finish();
    db.create_place(&place).unwrap();
    let note = Note::build()
        .place(place.id.as_str())
        .user(user.id.as_str())
        .finish();
    db.create_note(&note).unwrap();
    let comment = Comment::build()
        .place(place.id.as_str())
        .user(user.id.as_str())
        .finish();
    db.create_comment(&comment).unwrap();
    let note_image = Image {
        id: Id::new(),
        parent: ImageParent::Note(note.id.clone()),
        file_name: "note_images/x.jpg".into(),
        content_type: "image/jpeg".into(),
        created_at: Timestamp::now(),
    };
    db.create_image(&note_image).unwrap();
    let place_image = Image {
        id: Id::new(),
        parent: ImageParent::Place(place.id.clone()),
        file_name: "place_images/y.png".into(),
        content_type: "image/png".into(),
        created_at: Timestamp::now(),
    };
    db.create_image(&place_image).unwrap();
    assert_eq!(note_image, db.get_image(note_image.id.as_str()).unwrap());
    assert_eq!(
        vec![place_image.clone()],
        db.load_images(&ImageParent::Place(place.id.clone())).unwrap()
    );
    db.add_favorite(place.id.as_str(), user.id.as_str()).unwrap();

    db.delete_place(place.id.as_str()).unwrap();

    assert!(db.get_place(place.id.as_str()).is_err());
    assert!(db.get_note(note.id.as_str()).is_err());
    assert!(db.get_comment(comment.id.as_str()).is_err());
    assert!(db.get_image(note_image.id.as_str()).is_err());
    assert!(db.get_image(place_image.id.as_str()).is_err());
    assert!(!db.is_favorite(place.id.as_str(), user.id.as_str()).unwrap());
    assert!(matches!(
        db.delete_place(place.id.as_str()),
        Err(mythmap_core::RepoError::NotFound)
    ));
}

#[test]
fn update_cached_rating_of_place() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let user = User::build().finish();
    db.create_user(&user).unwrap();
    let place = Place::build().owner(user.id.as_str()).finish();
    db.create_place(&place).unwrap();
    let rating = RatingSummary {
        average: 3.5.into(),
        count: 2,
    };
    db.update_place_rating(place.id.as_str(), &rating, 3).unwrap();
    let loaded = db.get_place(place.id.as_str()).unwrap();
    assert_eq!(rating, loaded.rating);
    assert_eq!(3, loaded.notes_count);
}

#[test]
fn users_and_auth_tokens() {
    let connections = connections();
    let db = connections.exclusive().unwrap();
    let mut user = User::build().username("alice").email("alice@example.com").finish();
    db.create_user(&user).unwrap();
    assert!(matches!(
        db.create_user(&User::build().username("alice").finish()),
        Err(mythmap_core::RepoError::AlreadyExists)
    ));
    user.role = Role::Moderator;
    user.email = None;
    db.update_user(&user).unwrap();
    assert_eq!(
        Some(user.clone()),
        db.try_get_user_by_username("alice").unwrap()
    );
    assert_eq!(vec![user.clone()], db.get_users(&[user.id.as_str()]).unwrap());

    let token = AuthToken::generate(user.id.clone());
    db.create_auth_token(&token).unwrap();
    assert_eq!(token, db.get_auth_token(&token.key).unwrap());
    assert_eq!(
        Some(token),
        db.try_get_auth_token_of_user(user.id.as_str()).unwrap()
    );
    assert_eq!(1, db.delete_auth_tokens_of_user(user.id.as_str()).unwrap());
    assert_eq!(0, db.delete_auth_tokens_of_user(user.id.as_str()).unwrap());
}

#[test]
fn failed_transactions_are_rolled_back() {
    let connections = connections();
    let user = User::build().finish();
    let result = connections.exclusive().unwrap().transaction(|conn| {
        conn.create_user(&user)?;
        Err::<(), _>(mythmap_core::usecases::Error::Forbidden)
    });
    assert!(matches!(
        result,
        Err(mythmap_core::usecases::Error::Forbidden)
    ));
    let db = connections.shared().unwrap();
    assert_eq!(0, db.count_users().unwrap());
}
