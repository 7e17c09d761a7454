/// Value objects for the pairing domain
use serde::{Deserialize, Serialize};

/// Pair status enum matching database type
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::PairStatus"]
#[serde(rename_all = "lowercase")]
pub enum PairStatus {
    Unpaired,
    Paired,
}

impl std::fmt::Display for PairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairStatus::Unpaired => write!(f, "unpaired"),
            PairStatus::Paired => write!(f, "paired"),
        }
    }
}

/// How a pair was produced
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::PairingMethod"]
#[serde(rename_all = "snake_case")]
pub enum PairingMethod {
    AutoFilename,
    AutoSequential,
    Manual,
}

impl std::fmt::Display for PairingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingMethod::AutoFilename => write!(f, "auto_filename"),
            PairingMethod::AutoSequential => write!(f, "auto_sequential"),
            PairingMethod::Manual => write!(f, "manual"),
        }
    }
}

impl std::str::FromStr for PairingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto_filename" => Ok(PairingMethod::AutoFilename),
            "auto_sequential" => Ok(PairingMethod::AutoSequential),
            "manual" => Ok(PairingMethod::Manual),
            _ => Err(format!("Invalid pairing method: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_method_display() {
        assert_eq!(PairingMethod::AutoFilename.to_string(), "auto_filename");
        assert_eq!(PairingMethod::AutoSequential.to_string(), "auto_sequential");
        assert_eq!(PairingMethod::Manual.to_string(), "manual");
    }

    #[test]
    fn test_pairing_method_from_str() {
        assert_eq!(
            "auto_filename".parse::<PairingMethod>().unwrap(),
            PairingMethod::AutoFilename
        );
        assert!("guesswork".parse::<PairingMethod>().is_err());
    }
}
