pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{comment_builder::*, note_builder::*, place_builder::*, user_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{geo::*, id::*, moderation::*, place::*, rating::*, time::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.place.name = name.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.place.description = desc.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = pos;
            self
        }
        pub fn categories(mut self, categories: &str) -> Self {
            self.place.categories = Some(categories.into());
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.place.owner = owner.into();
            self
        }
        pub fn status(mut self, status: ModerationStatus) -> Self {
            self.place.moderation.status = status;
            self
        }
        pub fn created_at(mut self, ts: Timestamp) -> Self {
            self.place.created_at = ts;
            self.place.updated_at = ts;
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            let now = Timestamp::now();
            PlaceBuild {
                place: Place {
                    id: Id::new(),
                    name: "".into(),
                    description: "".into(),
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    categories: None,
                    moderation: Moderation::pending(),
                    owner: Id::new(),
                    created_at: now,
                    updated_at: now,
                    rating: RatingSummary::default(),
                    notes_count: 0,
                },
            }
        }
    }
}

pub mod note_builder {

    use super::*;
    use crate::{id::*, moderation::*, note::*, rating::*, time::*};

    #[derive(Debug)]
    pub struct NoteBuild {
        note: Note,
    }

    impl NoteBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.note.id = id.into();
            self
        }
        pub fn place(mut self, place_id: &str) -> Self {
            self.note.place_id = place_id.into();
            self
        }
        pub fn user(mut self, user_id: &str) -> Self {
            self.note.user_id = user_id.into();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.note.text = text.into();
            self
        }
        pub fn rating(mut self, rating: i64) -> Self {
            self.note.rating = Some(RatingValue::try_from(rating).unwrap());
            self
        }
        pub fn status(mut self, status: ModerationStatus) -> Self {
            self.note.moderation.status = status;
            self
        }
        pub fn finish(self) -> Note {
            self.note
        }
    }

    impl Builder for Note {
        type Build = NoteBuild;
        fn build() -> NoteBuild {
            let now = Timestamp::now();
            NoteBuild {
                note: Note {
                    id: Id::new(),
                    place_id: Id::new(),
                    user_id: Id::new(),
                    text: "note".into(),
                    rating: None,
                    moderation: Moderation::pending(),
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }

    #[test]
    fn only_approved_notes_are_effective() {
        let note = Note::build().rating(3).finish();
        assert_eq!(None, note.effective_rating());
        let note = Note::build()
            .rating(3)
            .status(ModerationStatus::Approved)
            .finish();
        assert_eq!(RatingValue::try_from(3).ok(), note.effective_rating());
    }
}

pub mod comment_builder {

    use super::*;
    use crate::{comment::*, id::*, moderation::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.comment.id = id.into();
            self
        }
        pub fn place(mut self, place_id: &str) -> Self {
            self.comment.place_id = place_id.into();
            self
        }
        pub fn user(mut self, user_id: &str) -> Self {
            self.comment.user_id = user_id.into();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.comment.text = text.into();
            self
        }
        pub fn status(mut self, status: ModerationStatus) -> Self {
            self.comment.moderation.status = status;
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Builder for Comment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            let now = Timestamp::now();
            CommentBuild {
                comment: Comment {
                    id: Id::new(),
                    place_id: Id::new(),
                    user_id: Id::new(),
                    text: "comment".into(),
                    moderation: Moderation::pending(),
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod user_builder {

    use super::*;
    use crate::{id::*, password::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }
        pub fn username(mut self, username: &str) -> Self {
            self.user.username = username.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = Some(email.into());
            self
        }
        /// Hashing is expensive, so only call this if needed.
        pub fn password(mut self, password: &str) -> Self {
            self.user.password = password.parse().unwrap();
            self
        }
        pub fn role(mut self, role: Role) -> Self {
            self.user.role = role;
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> UserBuild {
            let id = Id::new();
            UserBuild {
                user: User {
                    username: format!("user-{}", &id.as_str()[..8]),
                    id,
                    email: None,
                    password: Password::from_hash(String::new()),
                    role: Role::User,
                },
            }
        }
    }
}
