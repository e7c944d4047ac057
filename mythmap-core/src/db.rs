use crate::repositories::*;

/// All repositories of a single database connection or transaction.
pub trait Db:
    PlaceRepo + FavoriteRepo + NoteRepo + CommentRepo + ImageRepo + UserRepo + AuthTokenRepo
{
}

impl<T> Db for T where
    T: PlaceRepo + FavoriteRepo + NoteRepo + CommentRepo + ImageRepo + UserRepo + AuthTokenRepo
{
}
