use serde::{Deserialize, Serialize};

/// A mock-authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// The user the login screen signs in as
    pub fn demo() -> Self {
        User {
            id: "1".into(),
            name: "Demo User".into(),
            email: "demo@example.com".into(),
        }
    }

    /// Avatar initial: first char of the trimmed name, else the email, else `A`
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .or_else(|| self.email.trim().chars().next())
            .unwrap_or('A')
            .to_ascii_uppercase()
    }
}

/// Persisted login state (stored under `user_auth`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    pub fn logged_in(user: User) -> Self {
        Session {
            is_logged_in: true,
            user: Some(user),
        }
    }

    /// A stored session only counts when both the flag and the user are present
    pub fn normalized(self) -> Self {
        match self.user {
            Some(user) if self.is_logged_in => Session::logged_in(user),
            _ => Session::default(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        if self.is_logged_in {
            self.user.as_ref()
        } else {
            None
        }
    }
}

/// Color scheme selection (stored under `app_theme`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    /// Case-insensitive parse; anything other than light/dark is rejected
    pub fn parse(s: &str) -> Option<ThemeName> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeName::Light),
            "dark" => Some(ThemeName::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn toggled(self) -> ThemeName {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
