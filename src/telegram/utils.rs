use std::convert::TryFrom;

use teloxide::types::User;

pub fn format_user_display(user: &User) -> String {
    if let Some(username) = &user.username {
        format!("@{}", username)
    } else {
        let mut parts = Vec::new();
        parts.push(user.first_name.as_str());
        if let Some(last) = &user.last_name {
            parts.push(last.as_str());
        }
        let name = parts.join(" ").trim().to_string();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name
        }
    }
}

pub fn user_to_i64(user: &User) -> i64 {
    i64::try_from(user.id.0).unwrap_or(i64::MAX)
}

pub fn format_word_list(words: &[String]) -> String {
    if words.is_empty() {
        "(список пуст)".to_string()
    } else {
        words.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::UserId;

    use super::*;

    fn user(username: Option<&str>, first: &str, last: Option<&str>) -> User {
        User {
            id: UserId(7),
            is_bot: false,
            first_name: first.to_string(),
            last_name: last.map(|s| s.to_string()),
            username: username.map(|s| s.to_string()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn display_prefers_username() {
        assert_eq!(
            format_user_display(&user(Some("spammer"), "Вася", None)),
            "@spammer"
        );
    }

    #[test]
    fn display_falls_back_to_full_name() {
        assert_eq!(
            format_user_display(&user(None, "Вася", Some("Пупкин"))),
            "Вася Пупкин"
        );
        assert_eq!(format_user_display(&user(None, "", None)), "Unknown");
    }

    #[test]
    fn word_list_formatting() {
        assert_eq!(format_word_list(&[]), "(список пуст)");
        assert_eq!(
            format_word_list(&["casino".to_string(), "spamwordl".to_string()]),
            "casino, spamwordl"
        );
    }
}
