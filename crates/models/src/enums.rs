//! Closed value sets stored as short strings.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "enterprise")]
    Enterprise,
    #[sea_orm(string_value = "end_user")]
    EndUser,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::EndUser
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Enterprise => "enterprise",
            UserRole::EndUser => "end_user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enterprise" => Ok(UserRole::Enterprise),
            "end_user" => Ok(UserRole::EndUser),
            "admin" => Ok(UserRole::Admin),
            _ => Err("role must be enterprise, end_user or admin".to_string()),
        }
    }
}

/// Shared by users, enterprises and vouchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl Default for Status {
    fn default() -> Self {
        Status::Active
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            _ => Err("status must be active or inactive".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("end_user".parse::<UserRole>().unwrap(), UserRole::EndUser);
        assert_eq!("enterprise".parse::<UserRole>().unwrap(), UserRole::Enterprise);
        assert!("root".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn defaults_match_create_semantics() {
        assert_eq!(UserRole::default(), UserRole::EndUser);
        assert_eq!(Status::default(), Status::Active);
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(serde_json::to_value(UserRole::EndUser).unwrap(), "end_user");
        assert_eq!(serde_json::to_value(Status::Inactive).unwrap(), "inactive");
    }
}
