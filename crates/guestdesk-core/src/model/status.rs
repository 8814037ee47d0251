//! Closed status/category code sets.
//!
//! Every enum keeps the backend's wire code and a display label, plus an
//! `Unknown` variant so an unrecognized code degrades to its raw string
//! instead of failing deserialization.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── Order status ─────────────────────────────────────────────────────

/// Order lifecycle code (`P`, `C`, `PR`, `S`, `D`, `CA`, `R`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
    Unknown(String),
}

impl OrderStatus {
    /// Every known status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Statuses whose `total_amount` counts as revenue.
    pub const REVENUE_BEARING: [Self; 4] = [
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => Self::Pending,
            "C" => Self::Confirmed,
            "PR" => Self::Processing,
            "S" => Self::Shipped,
            "D" => Self::Delivered,
            "CA" => Self::Cancelled,
            "R" => Self::Refunded,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::Pending => "P",
            Self::Confirmed => "C",
            Self::Processing => "PR",
            Self::Shipped => "S",
            Self::Delivered => "D",
            Self::Cancelled => "CA",
            Self::Refunded => "R",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_revenue_bearing(&self) -> bool {
        Self::REVENUE_BEARING.contains(self)
    }
}

// ── Room category ────────────────────────────────────────────────────

/// Room category code (`G`, `V`, `S`, `D`). Defaults to `General`, the
/// backend's default for new rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RoomCategory {
    #[default]
    General,
    Vip,
    Suite,
    Deluxe,
    Unknown(String),
}

impl RoomCategory {
    pub const ALL: [Self; 4] = [Self::General, Self::Vip, Self::Suite, Self::Deluxe];

    pub fn from_code(code: &str) -> Self {
        match code {
            "G" => Self::General,
            "V" => Self::Vip,
            "S" => Self::Suite,
            "D" => Self::Deluxe,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::General => "G",
            Self::Vip => "V",
            Self::Suite => "S",
            Self::Deluxe => "D",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::General => "General",
            Self::Vip => "VIP",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
            Self::Unknown(code) => code,
        }
    }
}

// ── Staff role ───────────────────────────────────────────────────────

/// Staff role code (`ADMIN`, `MANAGER`, `STAFF`). Defaults to `Staff`,
/// the backend's default for new accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
    Unknown(String),
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::Staff];

    pub fn from_code(code: &str) -> Self {
        match code {
            "ADMIN" => Self::Admin,
            "MANAGER" => Self::Manager,
            "STAFF" => Self::Staff,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Staff => "STAFF",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::Staff => "Staff Member",
            Self::Unknown(code) => code,
        }
    }
}

// ── Staff account status ─────────────────────────────────────────────

/// Staff account status code (`ACTIVE`, `INACTIVE`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Unknown(String),
}

impl UserStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    pub fn from_code(code: &str) -> Self {
        match code {
            "ACTIVE" => Self::Active,
            "INACTIVE" => Self::Inactive,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Unknown(code) => code,
        }
    }
}

// ── Shared trait plumbing ────────────────────────────────────────────

macro_rules! code_enum_serde {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_str(self.as_code())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let code = String::deserialize(de)?;
                Ok(Self::from_code(&code))
            }
        }
    };
}

code_enum_serde!(OrderStatus);
code_enum_serde!(RoomCategory);
code_enum_serde!(UserRole);
code_enum_serde!(UserStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_code(status.as_code()), status);
        }
        for cat in RoomCategory::ALL {
            assert_eq!(RoomCategory::from_code(cat.as_code()), cat);
        }
    }

    #[test]
    fn unknown_code_degrades_to_raw_string() {
        let status = OrderStatus::from_code("ZZ");
        assert_eq!(status, OrderStatus::Unknown("ZZ".into()));
        assert_eq!(status.as_code(), "ZZ");
        assert_eq!(status.label(), "ZZ");
        assert!(!status.is_revenue_bearing());
    }

    #[test]
    fn revenue_set_matches_admin_dashboard() {
        let codes: Vec<&str> = OrderStatus::REVENUE_BEARING
            .iter()
            .map(OrderStatus::as_code)
            .collect();
        assert_eq!(codes, ["C", "PR", "S", "D"]);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&OrderStatus::Processing).expect("serialize");
        assert_eq!(json, r#""PR""#);
        let back: OrderStatus = serde_json::from_str(r#""CA""#).expect("deserialize");
        assert_eq!(back, OrderStatus::Cancelled);
    }
}
