use serde::{Deserialize, Serialize};

/// Body de `POST /user/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `{ token, user: { type, id } }`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct LoginUser {
    #[serde(rename = "type")]
    pub role: String,
    pub id: String,
}

/// `{ user: { _doc: { type, _id } } }` devuelto por `GET /current/user`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CurrentUserResponse {
    pub user: CurrentUserEnvelope,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CurrentUserEnvelope {
    #[serde(rename = "_doc")]
    pub doc: CurrentUserDoc,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CurrentUserDoc {
    #[serde(rename = "type")]
    pub role: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Dueño de la sesión, una vez confirmado por el backend
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Identity {
    pub role: String,
    pub user_id: String,
}
