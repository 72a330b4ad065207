use time::{format_description::FormatItem, macros::format_description, UtcOffset};
use tracing::warn;

use crate::users::{dto::UserView, repo_types::User};

const CREATED_AT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn to_view(user: &User) -> UserView {
    let created_at = user
        .created_at
        .to_offset(UtcOffset::UTC)
        .format(CREATED_AT_FORMAT)
        .unwrap_or_else(|e| {
            warn!(error = %e, user_id = %user.id, "created_at formatting failed");
            String::new()
        });
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    #[test]
    fn copies_identity_and_drops_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: datetime!(2024-03-05 07:08:09 UTC),
        };
        let view = to_view(&user);
        assert_eq!(view.id, user.id);
        assert_eq!(view.username, "alice");
        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.created_at, "2024-03-05 07:08:09");

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn created_at_is_rendered_in_utc() {
        let user = User {
            id: Uuid::new_v4(),
            username: "bob".into(),
            email: "b@x.com".into(),
            password_hash: String::new(),
            created_at: datetime!(2024-03-05 02:00:00 +02:00),
        };
        assert_eq!(to_view(&user).created_at, "2024-03-05 00:00:00");
    }
}
