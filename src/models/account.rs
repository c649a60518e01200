//! Account models.
//!
//! Roles are stored as lowercase text and exposed to clients as `Host` / `Listener`.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum Role {
    Host,
    Listener,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Listener => "listener",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => f.write_str("Host"),
            Role::Listener => f.write_str("Listener"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host" => Ok(Role::Host),
            "listener" => Ok(Role::Listener),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl ToSql<Text, Pg> for Role {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Role {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<Role>().map_err(Into::into)
    }
}

#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    pub id: i32,
    pub email: String,
    /// argon2 PHC string
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial update for an account. A present password is expected to be hashed already.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::accounts)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn apply_to(&self, account: &mut Account) {
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(password) = &self.password {
            account.password = password.clone();
        }
    }
}

/// Account without credential material, plus its links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub subscriptions: Vec<i32>,
    pub played_episodes: Vec<i32>,
}

/// Identity acting on an ownership-gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub account_id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(account_id: i32, role: Role) -> Self {
        Self { account_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("host".parse::<Role>().unwrap(), Role::Host);
        assert_eq!("Listener".parse::<Role>().unwrap(), Role::Listener);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_json_uses_capitalized_names() {
        assert_eq!(serde_json::to_string(&Role::Host).unwrap(), "\"Host\"");
        let role: Role = serde_json::from_str("\"Listener\"").unwrap();
        assert_eq!(role, Role::Listener);
        assert_eq!(Role::Listener.to_string(), "Listener");
        assert_eq!(Role::Listener.as_str(), "listener");
    }

    #[test]
    fn test_account_changes_apply() {
        let mut account = Account {
            id: 1,
            email: "a@example.com".to_string(),
            password: "hash".to_string(),
            role: Role::Host,
        };
        let changes = AccountChanges {
            email: Some("b@example.com".to_string()),
            password: None,
        };
        assert!(!changes.is_empty());
        changes.apply_to(&mut account);
        assert_eq!(account.email, "b@example.com");
        assert_eq!(account.password, "hash");
        assert!(AccountChanges::default().is_empty());
    }
}
