use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Upper bound on participant id length; matches the `participants.id` column.
pub const MAX_ID_LEN: usize = 128;

/// One of the three experimental conditions.
///
/// Wire names are fixed (`TestGroup1..3`); the numeric index 1..=3 is what the
/// balancer and the client-side assignment slot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "TestGroup1")]
    One,
    #[serde(rename = "TestGroup2")]
    Two,
    #[serde(rename = "TestGroup3")]
    Three,
}

impl Group {
    /// All groups in balancer read order.
    pub const ALL: [Group; 3] = [Group::One, Group::Two, Group::Three];

    pub const fn as_str(self) -> &'static str {
        match self {
            Group::One => "TestGroup1",
            Group::Two => "TestGroup2",
            Group::Three => "TestGroup3",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Group::One => 1,
            Group::Two => 2,
            Group::Three => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Group> {
        match index {
            1 => Some(Group::One),
            2 => Some(Group::Two),
            3 => Some(Group::Three),
            _ => None,
        }
    }

    pub fn parse(raw: &str) -> Result<Group, DomainError> {
        raw.parse().map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidGroup,
                format!("'{raw}' is not a valid group"),
            )
        })
    }
}

impl FromStr for Group {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gameplay outcome recorded with the registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn parse(raw: &str) -> Result<Direction, DomainError> {
        raw.parse().map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidDirection,
                format!("'{raw}' is not a valid direction (expected left or right)"),
            )
        })
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, client-generated participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn parse(raw: &str) -> Result<ParticipantId, DomainError> {
        if raw.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingId,
                "id must be non-empty",
            ));
        }
        if raw.len() > MAX_ID_LEN {
            return Err(DomainError::validation(
                ValidationKind::InvalidId,
                format!("id must be at most {MAX_ID_LEN} bytes"),
            ));
        }
        if raw.chars().any(char::is_control) {
            return Err(DomainError::validation(
                ValidationKind::InvalidId,
                "id must not contain control characters",
            ));
        }
        Ok(ParticipantId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_names_round_trip_through_index() {
        for g in Group::ALL {
            assert_eq!(Group::from_index(g.index()), Some(g));
            assert_eq!(g.as_str().parse::<Group>(), Ok(g));
        }
        assert_eq!(Group::from_index(0), None);
        assert_eq!(Group::from_index(4), None);
    }

    #[test]
    fn group_parse_is_exact() {
        assert!(Group::parse("TestGroup1").is_ok());
        for bad in ["testgroup1", "TestGroup4", "1", "", " TestGroup1"] {
            let err = Group::parse(bad).unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidGroup, _)
            ));
        }
    }

    #[test]
    fn direction_parse_is_exact() {
        assert_eq!(Direction::parse("left").unwrap(), Direction::Left);
        assert_eq!(Direction::parse("right").unwrap(), Direction::Right);
        for bad in ["Left", "up", ""] {
            assert!(matches!(
                Direction::parse(bad).unwrap_err(),
                DomainError::Validation(ValidationKind::InvalidDirection, _)
            ));
        }
    }

    #[test]
    fn participant_id_rules() {
        assert_eq!(ParticipantId::parse("abc-123").unwrap().as_str(), "abc-123");
        assert!(matches!(
            ParticipantId::parse("   ").unwrap_err(),
            DomainError::Validation(ValidationKind::MissingId, _)
        ));
        assert!(matches!(
            ParticipantId::parse(&"x".repeat(MAX_ID_LEN + 1)).unwrap_err(),
            DomainError::Validation(ValidationKind::InvalidId, _)
        ));
        assert!(matches!(
            ParticipantId::parse("a\nb").unwrap_err(),
            DomainError::Validation(ValidationKind::InvalidId, _)
        ));
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Group::Two).unwrap(),
            "\"TestGroup2\""
        );
        assert_eq!(
            serde_json::to_string(&Direction::Right).unwrap(),
            "\"right\""
        );
    }
}
