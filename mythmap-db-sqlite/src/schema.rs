///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        username -> Text,
        email -> Nullable<Text>,
        password -> Text,
        role -> SmallInt,
    }
}

table! {
    auth_tokens (token) {
        token -> Text,
        user_id -> Text,
        created_at -> BigInt,
    }
}

joinable!(auth_tokens -> users (user_id));

///////////////////////////////////////////////////////////////////////
// Places
///////////////////////////////////////////////////////////////////////

table! {
    places (id) {
        id -> Text,
        name -> Text,
        description -> Text,
        lat -> Double,
        lng -> Double,
        categories -> Nullable<Text>,
        status -> SmallInt,
        rejection_reason -> Nullable<Text>,
        owner_id -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
        avg_rating -> Double,
        rating_count -> BigInt,
        notes_count -> BigInt,
    }
}

joinable!(places -> users (owner_id));

table! {
    place_favorites (place_id, user_id) {
        place_id -> Text,
        user_id -> Text,
    }
}

joinable!(place_favorites -> places (place_id));
joinable!(place_favorites -> users (user_id));

table! {
    place_images (id) {
        id -> Text,
        place_id -> Text,
        file_name -> Text,
        content_type -> Text,
        created_at -> BigInt,
    }
}

joinable!(place_images -> places (place_id));

///////////////////////////////////////////////////////////////////////
// Notes and comments
///////////////////////////////////////////////////////////////////////

table! {
    notes (id) {
        id -> Text,
        place_id -> Text,
        user_id -> Text,
        text -> Text,
        rating -> Nullable<SmallInt>,
        status -> SmallInt,
        rejection_reason -> Nullable<Text>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

joinable!(notes -> places (place_id));

table! {
    note_images (id) {
        id -> Text,
        note_id -> Text,
        file_name -> Text,
        content_type -> Text,
        created_at -> BigInt,
    }
}

joinable!(note_images -> notes (note_id));

table! {
    comments (id) {
        id -> Text,
        place_id -> Text,
        user_id -> Text,
        text -> Text,
        status -> SmallInt,
        rejection_reason -> Nullable<Text>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

joinable!(comments -> places (place_id));

allow_tables_to_appear_in_same_query!(
    users,
    auth_tokens,
    places,
    place_favorites,
    place_images,
    notes,
    note_images,
    comments,
);
