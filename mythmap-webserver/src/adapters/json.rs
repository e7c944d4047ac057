pub use mythmap_boundary::*;

use crate::core::{entities as e, gateways::MediaStore, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn new_place(from: NewPlace) -> usecases::NewPlace {
        let NewPlace {
            name,
            description,
            lat,
            lon,
            categories,
        } = from;
        usecases::NewPlace {
            name,
            description,
            lat,
            lng: lon,
            categories,
        }
    }

    pub fn place_patch(from: PlacePatch) -> usecases::PlacePatch {
        let PlacePatch {
            name,
            description,
            lat,
            lon,
            categories,
        } = from;
        usecases::PlacePatch {
            name,
            description,
            lat,
            lng: lon,
            categories,
        }
    }

    pub fn new_note(from: NewNote) -> usecases::NewNote {
        let NewNote {
            place,
            text,
            rating,
        } = from;
        usecases::NewNote {
            place_id: place,
            text,
            rating,
        }
    }

    pub fn note_patch(from: NotePatch) -> usecases::NotePatch {
        let NotePatch { text, rating } = from;
        usecases::NotePatch { text, rating }
    }

    pub fn new_comment(from: NewComment) -> usecases::NewComment {
        let NewComment { place, text } = from;
        usecases::NewComment {
            place_id: place,
            text,
        }
    }

    pub fn registration(from: Registration) -> usecases::Registration {
        let Registration {
            username,
            email,
            password,
        } = from;
        usecases::Registration {
            username,
            email,
            password,
        }
    }

    pub fn moderation_action(rejection: Option<Rejection>) -> usecases::ModerationAction {
        usecases::ModerationAction::Reject {
            reason: rejection.and_then(|r| r.reason),
        }
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10_f64.powi(decimals);
        (value * factor).round() / factor
    }

    pub fn image(from: &e::Image, media: &dyn MediaStore) -> Image {
        Image {
            id: from.id.to_string(),
            url: media.url(&from.file_name),
        }
    }

    pub fn images(from: &[e::Image], media: &dyn MediaStore) -> Vec<Image> {
        from.iter().map(|img| image(img, media)).collect()
    }

    pub fn note(
        from: usecases::Authored<e::Note>,
        images: &[e::Image],
        media: &dyn MediaStore,
    ) -> Note {
        let usecases::Authored { item, author } = from;
        let e::Note {
            id,
            place_id,
            user_id: _,
            text,
            rating,
            moderation,
            created_at,
            updated_at,
        } = item;
        Note {
            id: id.into(),
            place: place_id.into(),
            user: UserInfo::from(&author),
            author_username: author.username,
            text,
            rating: rating.map(u8::from),
            moderation_status: moderation.status.into(),
            rejection_reason: moderation.rejection_reason,
            images: self::images(images, media),
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    pub fn comment(from: usecases::Authored<e::Comment>) -> Comment {
        let usecases::Authored { item, author } = from;
        let e::Comment {
            id,
            place_id,
            user_id: _,
            text,
            moderation,
            created_at,
            updated_at,
        } = item;
        Comment {
            id: id.into(),
            place: place_id.into(),
            user: UserInfo::from(&author),
            author_username: author.username,
            text,
            moderation_status: moderation.status.into(),
            rejection_reason: moderation.rejection_reason,
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    /// The note of the current user needs its images,
    /// which are loaded separately.
    pub fn place(
        from: usecases::PlaceDetails,
        current_user_note_images: &[e::Image],
        media: &dyn MediaStore,
    ) -> Place {
        let usecases::PlaceDetails {
            place,
            owner,
            images,
            is_favorite,
            current_user_note,
            distance,
        } = from;
        let e::Place {
            id,
            name,
            description,
            pos,
            categories,
            moderation,
            owner: _,
            created_at,
            updated_at,
            rating,
            notes_count,
        } = place;
        // Undo the fixed-point storage of the coordinates
        let (lat, lon) = pos.to_lat_lng_deg();
        let (lat, lon) = (round_to(lat, 7), round_to(lon, 7));
        let avg_rating = (!rating.is_empty()).then(|| rating.average.round_to(1));
        Place {
            id: id.into(),
            name,
            description,
            lat,
            lon,
            categories,
            status: moderation.status.into(),
            rejection_reason: moderation.rejection_reason,
            owner: UserInfo::from(&owner),
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
            notes_count,
            avg_rating,
            average_rating: rating.average.round_to(2),
            rating_count: rating.count,
            is_favorite,
            current_user_note: current_user_note
                .map(|n| note(n, current_user_note_images, media)),
            images: self::images(&images, media),
            distance: distance.map(|d| round_to(d.to_meters(), 2)),
        }
    }

    pub fn moderated(from: usecases::Moderated) -> ModerationResult {
        let action = match from.status {
            e::ModerationStatus::Approved => "approved",
            e::ModerationStatus::Rejected => "rejected",
            e::ModerationStatus::Pending => "pending",
        };
        ModerationResult {
            status: format!("{} {}", from.kind, action),
            id: from.id.into(),
        }
    }

    pub fn favorite_toggled(from: usecases::FavoriteToggled) -> StatusMessage {
        let status = match from {
            usecases::FavoriteToggled::Added => "added to favorites",
            usecases::FavoriteToggled::Removed => "removed from favorites",
        };
        StatusMessage {
            status: status.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entities::{
        AvgRatingValue, Builder, Distance, Image, ImageParent, MapPoint, ModerationStatus, Place,
        RatingSummary, Timestamp, User,
    };

    struct Media;

    impl MediaStore for Media {
        fn store(&self, _: &str, _: &[u8]) -> std::io::Result<()> {
            Ok(())
        }
        fn remove(&self, _: &str) -> std::io::Result<()> {
            Ok(())
        }
        fn url(&self, file_name: &str) -> String {
            format!("/media/{file_name}")
        }
    }

    fn details(rating: RatingSummary) -> usecases::PlaceDetails {
        let owner = User::build().username("alice").finish();
        let mut place = Place::build()
            .owner(owner.id.as_str())
            .pos(MapPoint::from_lat_lng_deg(48.5, 9.25))
            .finish();
        place.rating = rating;
        usecases::PlaceDetails {
            images: vec![Image {
                id: "img".into(),
                parent: ImageParent::Place(place.id.clone()),
                file_name: "place_images/img.png".into(),
                content_type: "image/png".into(),
                created_at: Timestamp::now(),
            }],
            place,
            owner,
            is_favorite: true,
            current_user_note: None,
            distance: Some(Distance::from_meters(1234.5678)),
        }
    }

    #[test]
    fn place_rating_projections() {
        let rating = RatingSummary {
            average: AvgRatingValue::from(11.0 / 3.0),
            count: 3,
        };
        let place = to_json::place(details(rating), &[], &Media);
        assert_eq!(Some(3.7), place.avg_rating);
        assert_eq!(3.67, place.average_rating);
        assert_eq!(3, place.rating_count);
        assert_eq!(Some(1234.57), place.distance);
        assert_eq!((48.5, 9.25), (place.lat, place.lon));
        assert_eq!("alice", place.owner.username);
        assert_eq!("/media/place_images/img.png", place.images[0].url);
    }

    #[test]
    fn place_without_ratings() {
        let place = to_json::place(details(RatingSummary::default()), &[], &Media);
        assert_eq!(None, place.avg_rating);
        assert_eq!(0.0, place.average_rating);
        assert_eq!(0, place.rating_count);
    }

    #[test]
    fn moderation_result_messages() {
        let res = to_json::moderated(usecases::Moderated {
            kind: usecases::ModeratedKind::Note,
            id: "n1".into(),
            status: ModerationStatus::Rejected,
        });
        assert_eq!("note rejected", res.status);
        assert_eq!("n1", res.id);
    }
}
