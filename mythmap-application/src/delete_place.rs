use super::*;

pub fn delete_place(
    connections: &sqlite::Connections,
    media: &dyn MediaStore,
    requester: Option<&User>,
    id: &str,
) -> Result<()> {
    let images = connections.exclusive()?.transaction(|conn| {
        usecases::delete_place(conn, requester, id).map_err(|err| {
            warn!("Failed to delete place {}: {}", id, err);
            err
        })
    })?;
    info!("Deleted place {} with {} image(s)", id, images.len());
    hooks::remove_image_files(media, &images);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn delete_place_with_notes_and_image_files() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        let note = fixture.create_note(&owner, &place.id, Some(4));
        fixture.approve_note(&moderator, &note.id);
        for parent in [
            ImageParent::Place(place.id.clone()),
            ImageParent::Note(note.id.clone()),
        ] {
            flows::add_image(
                &fixture.db_connections,
                &fixture.media,
                Some(&owner),
                parent,
                "image/jpeg",
                b"jpeg",
            )
            .unwrap();
        }
        assert_eq!(2, fixture.media.files.borrow().len());

        flows::delete_place(
            &fixture.db_connections,
            &fixture.media,
            Some(&owner),
            place.id.as_str(),
        )
        .unwrap();

        assert!(fixture.media.files.borrow().is_empty());
        assert!(fixture.try_get_note(&note.id).is_none());
        assert!(matches!(
            fixture
                .db_connections
                .shared()
                .unwrap()
                .get_place(place.id.as_str()),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn a_failed_deletion_keeps_the_files() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let other = fixture.create_user("other", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        flows::add_image(
            &fixture.db_connections,
            &fixture.media,
            Some(&owner),
            ImageParent::Place(place.id.clone()),
            "image/jpeg",
            b"jpeg",
        )
        .unwrap();

        assert!(flows::delete_place(
            &fixture.db_connections,
            &fixture.media,
            Some(&other),
            place.id.as_str(),
        )
        .is_err());
        assert_eq!(1, fixture.media.files.borrow().len());
    }
}
