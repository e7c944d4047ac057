use super::*;
use mythmap_entities as e;

impl From<e::user::Role> for UserRole {
    fn from(from: e::user::Role) -> Self {
        use e::user::Role::*;
        match from {
            User => UserRole::User,
            Moderator => UserRole::Moderator,
            Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for e::user::Role {
    fn from(from: UserRole) -> Self {
        use e::user::Role::*;
        match from {
            UserRole::User => User,
            UserRole::Moderator => Moderator,
            UserRole::Admin => Admin,
        }
    }
}

impl From<e::moderation::ModerationStatus> for ModerationStatus {
    fn from(from: e::moderation::ModerationStatus) -> Self {
        use e::moderation::ModerationStatus::*;
        match from {
            Pending => ModerationStatus::Pending,
            Approved => ModerationStatus::Approved,
            Rejected => ModerationStatus::Rejected,
        }
    }
}

impl From<ModerationStatus> for e::moderation::ModerationStatus {
    fn from(from: ModerationStatus) -> Self {
        use e::moderation::ModerationStatus::*;
        match from {
            ModerationStatus::Pending => Pending,
            ModerationStatus::Approved => Approved,
            ModerationStatus::Rejected => Rejected,
        }
    }
}

impl From<&e::user::User> for UserInfo {
    fn from(from: &e::user::User) -> Self {
        Self {
            id: from.id.to_string(),
            username: from.username.clone(),
            role: from.role.into(),
        }
    }
}

impl From<e::user::User> for Profile {
    fn from(from: e::user::User) -> Self {
        let is_moderator = from.can_moderate();
        let e::user::User {
            id,
            username,
            email,
            password: _password,
            role,
        } = from;
        Self {
            id: id.into(),
            username,
            email,
            role: role.into(),
            is_moderator,
        }
    }
}

impl From<(e::user::User, e::token::AuthToken)> for Registered {
    fn from((user, token): (e::user::User, e::token::AuthToken)) -> Self {
        Self {
            user_id: user.id.into(),
            username: user.username,
            email: user.email,
            token: token.key,
        }
    }
}

impl From<(e::user::User, e::token::AuthToken)> for LoggedIn {
    fn from((user, token): (e::user::User, e::token::AuthToken)) -> Self {
        Self {
            token: token.key,
            user_id: user.id.into(),
            email: user.email,
            username: user.username,
        }
    }
}
