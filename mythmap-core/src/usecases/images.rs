use super::{
    authenticated, authorize_modification, get_accessible_note, get_accessible_place, prelude::*,
};
use crate::gateways::MediaStore;

enum Parent {
    Place(Place),
    Note(Note),
}

fn authorize_image_parent<R>(
    repo: &R,
    requester: Option<&User>,
    parent: &ImageParent,
) -> Result<Parent>
where
    R: PlaceRepo + NoteRepo,
{
    let user = authenticated(requester)?;
    match parent {
        ImageParent::Place(id) => {
            let place = get_accessible_place(repo, requester, id.as_str())?;
            authorize_modification(user, &place.owner)?;
            Ok(Parent::Place(place))
        }
        ImageParent::Note(id) => {
            let note = get_accessible_note(repo, requester, id.as_str())?;
            authorize_modification(user, &note.user_id)?;
            Ok(Parent::Note(note))
        }
    }
}

/// Images are part of their parent, so changing them is
/// an edit that needs another review if done by the owner.
fn reset_after_owner_edit<R>(repo: &R, user: &User, parent: Parent) -> Result<()>
where
    R: PlaceRepo + NoteRepo,
{
    match parent {
        Parent::Place(mut place) => {
            if place.is_owned_by(&user.id) && place.moderation.reset_after_owner_edit() {
                log::info!("Place {} needs to be reviewed again", place.id);
                place.updated_at = Timestamp::now();
                repo.update_place(&place)?;
            }
        }
        Parent::Note(mut note) => {
            if note.is_owned_by(&user.id) && note.moderation.reset_after_owner_edit() {
                log::info!("Note {} needs to be reviewed again", note.id);
                note.updated_at = Timestamp::now();
                repo.update_note(&note)?;
            }
        }
    }
    Ok(())
}

fn media_dir(parent: &ImageParent) -> &'static str {
    match parent {
        ImageParent::Place(_) => "place_images",
        ImageParent::Note(_) => "note_images",
    }
}

/// Store an uploaded image of a place or note.
pub fn add_image<R, M>(
    repo: &R,
    media: &M,
    requester: Option<&User>,
    parent: ImageParent,
    content_type: &str,
    data: &[u8],
) -> Result<Image>
where
    R: PlaceRepo + NoteRepo + ImageRepo,
    M: MediaStore + ?Sized,
{
    let user = authenticated(requester)?;
    let loaded_parent = authorize_image_parent(repo, requester, &parent)?;
    let extension =
        file_extension(content_type).ok_or_else(|| Error::ImageType(content_type.to_owned()))?;
    if data.is_empty() {
        return Err(Error::EmptyImage);
    }
    reset_after_owner_edit(repo, user, loaded_parent)?;
    let id = Id::new();
    let file_name = format!("{}/{}.{}", media_dir(&parent), id, extension);
    media.store(&file_name, data).map_err(Error::Media)?;
    let image = Image {
        id,
        parent,
        file_name,
        content_type: content_type.to_owned(),
        created_at: Timestamp::now(),
    };
    if let Err(err) = repo.create_image(&image) {
        if let Err(err) = media.remove(&image.file_name) {
            log::warn!("Failed to remove orphaned file {}: {}", image.file_name, err);
        }
        return Err(err.into());
    }
    log::debug!("Stored image {} ({} bytes)", image.file_name, data.len());
    Ok(image)
}

/// The file of the returned image needs to be removed afterwards.
pub fn delete_image<R>(
    repo: &R,
    requester: Option<&User>,
    parent: &ImageParent,
    image_id: &str,
) -> Result<Image>
where
    R: PlaceRepo + NoteRepo + ImageRepo,
{
    let user = authenticated(requester)?;
    let loaded_parent = authorize_image_parent(repo, requester, parent)?;
    let image = repo.get_image(image_id)?;
    if &image.parent != parent {
        return Err(Error::Repo(RepoError::NotFound));
    }
    reset_after_owner_edit(repo, user, loaded_parent)?;
    repo.delete_image(image.id.as_str())?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{MockDb, MockMediaStore},
        *,
    };
    use mythmap_entities::builders::*;

    fn setup() -> (MockDb, User, Place) {
        let db = MockDb::default();
        let owner = db.add_user(User::build().finish());
        let place = db.add_place(
            Place::build()
                .owner(owner.id.as_str())
                .status(ModerationStatus::Approved)
                .finish(),
        );
        (db, owner, place)
    }

    #[test]
    fn add_and_delete_place_image() {
        let (db, owner, place) = setup();
        let media = MockMediaStore::default();
        let parent = ImageParent::Place(place.id.clone());
        let image =
            add_image(&db, &media, Some(&owner), parent.clone(), "image/png", b"PNG").unwrap();
        assert!(image.file_name.starts_with("place_images/"));
        assert!(image.file_name.ends_with(".png"));
        assert!(media.files.borrow().contains_key(&image.file_name));
        assert_eq!(1, db.images.borrow().len());

        let deleted = delete_image(&db, Some(&owner), &parent, image.id.as_str()).unwrap();
        assert_eq!(image, deleted);
        assert!(db.images.borrow().is_empty());
    }

    #[test]
    fn reject_invalid_uploads() {
        let (db, owner, place) = setup();
        let media = MockMediaStore::default();
        let parent = ImageParent::Place(place.id.clone());
        assert!(matches!(
            add_image(&db, &media, Some(&owner), parent.clone(), "text/plain", b"x"),
            Err(Error::ImageType(_))
        ));
        assert!(matches!(
            add_image(&db, &media, Some(&owner), parent.clone(), "image/jpeg", b""),
            Err(Error::EmptyImage)
        ));
        let other = db.add_user(User::build().finish());
        assert!(matches!(
            add_image(&db, &media, Some(&other), parent, "image/jpeg", b"x"),
            Err(Error::Forbidden)
        ));
        assert!(media.files.borrow().is_empty());
        assert_eq!(
            ModerationStatus::Approved,
            db.places.borrow()[0].moderation.status
        );
    }

    #[test]
    fn image_must_belong_to_parent() {
        let (db, owner, place) = setup();
        let note = db.add_note(
            Note::build()
                .place(place.id.as_str())
                .user(owner.id.as_str())
                .status(ModerationStatus::Approved)
                .finish(),
        );
        let image = db.add_image(ImageParent::Note(note.id.clone()), "n.jpg");
        assert!(matches!(
            delete_image(
                &db,
                Some(&owner),
                &ImageParent::Place(place.id.clone()),
                image.id.as_str()
            ),
            Err(Error::Repo(RepoError::NotFound))
        ));
        assert!(delete_image(
            &db,
            Some(&owner),
            &ImageParent::Note(note.id.clone()),
            image.id.as_str()
        )
        .is_ok());
    }

    #[test]
    fn owner_image_changes_need_another_review() {
        let (db, owner, place) = setup();
        let media = MockMediaStore::default();
        let parent = ImageParent::Place(place.id.clone());
        let image =
            add_image(&db, &media, Some(&owner), parent.clone(), "image/png", b"PNG").unwrap();
        assert_eq!(
            ModerationStatus::Pending,
            db.places.borrow()[0].moderation.status
        );

        db.places.borrow_mut()[0].moderation.approve();
        delete_image(&db, Some(&owner), &parent, image.id.as_str()).unwrap();
        assert_eq!(
            ModerationStatus::Pending,
            db.places.borrow()[0].moderation.status
        );
    }

    #[test]
    fn owner_note_image_resets_the_note() {
        let (db, owner, place) = setup();
        let media = MockMediaStore::default();
        let note = db.add_note(
            Note::build()
                .place(place.id.as_str())
                .user(owner.id.as_str())
                .status(ModerationStatus::Approved)
                .finish(),
        );
        add_image(
            &db,
            &media,
            Some(&owner),
            ImageParent::Note(note.id.clone()),
            "image/jpeg",
            b"JPG",
        )
        .unwrap();
        assert_eq!(
            ModerationStatus::Pending,
            db.notes.borrow()[0].moderation.status
        );
        assert_eq!(
            ModerationStatus::Approved,
            db.places.borrow()[0].moderation.status
        );
    }

    #[test]
    fn admin_image_changes_keep_the_status() {
        let (db, _, place) = setup();
        let admin = db.add_user(User::build().role(Role::Admin).finish());
        let media = MockMediaStore::default();
        add_image(
            &db,
            &media,
            Some(&admin),
            ImageParent::Place(place.id.clone()),
            "image/png",
            b"PNG",
        )
        .unwrap();
        assert_eq!(
            ModerationStatus::Approved,
            db.places.borrow()[0].moderation.status
        );
    }
}
