use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer for `Vec<String>` that treats `null` as an empty list.
/// The search service sends `"suggestions": null` when it has nothing to offer.
fn deserialize_nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(list.unwrap_or_default())
}

/// Response of `GET /validate-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Error body returned by the service on failed requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `POST /token`, sent form-encoded.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub word: String,
}

/// Response of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub word: String,
    pub exact_match: bool,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub suggestions: Vec<String>,
}

impl SearchResult {
    pub fn exact(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            exact_match: true,
            meaning: Some(meaning.into()),
            suggestions: Vec::new(),
        }
    }

    pub fn fuzzy(word: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            word: word.into(),
            exact_match: false,
            meaning: None,
            suggestions,
        }
    }
}

/// Response of `GET /dictionary-words`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryWords {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Authentication state of the current client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: Some(User {
                username: username.into(),
            }),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
