//! Retreading cycle count and tire pressure check frequency

use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of retreads performed on each tire carcass (0, 1 or 2)
///
/// Serialized as the strings `"0"`, `"1"`, `"2"` like the submitted form;
/// plain integers are accepted on input as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RetreadingCycles {
    #[default]
    Zero,
    One,
    Two,
}

impl RetreadingCycles {
    pub fn count(self) -> u32 {
        match self {
            RetreadingCycles::Zero => 0,
            RetreadingCycles::One => 1,
            RetreadingCycles::Two => 2,
        }
    }

    pub fn from_count(count: u64) -> Option<Self> {
        match count {
            0 => Some(RetreadingCycles::Zero),
            1 => Some(RetreadingCycles::One),
            2 => Some(RetreadingCycles::Two),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RetreadingCycles::Zero => "0",
            RetreadingCycles::One => "1",
            RetreadingCycles::Two => "2",
        }
    }

    /// Whether the carcass goes through at least one retread
    pub fn has_retreads(self) -> bool {
        self != RetreadingCycles::Zero
    }
}

impl std::fmt::Display for RetreadingCycles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetreadingCycles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::from_count)
            .ok_or_else(|| format!("invalid retreading cycles '{}': expected 0, 1 or 2", s))
    }
}

impl Serialize for RetreadingCycles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RetreadingCycles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from_count(n).ok_or_else(|| {
                D::Error::custom(format!("invalid retreading cycles {}: expected 0, 1 or 2", n))
            }),
            Raw::Text(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

/// How often the fleet checks tire pressure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TirePressureCheck {
    #[serde(rename = "diaria")]
    Daily,
    #[serde(rename = "semanal")]
    #[default]
    Weekly,
    #[serde(rename = "quinzenal")]
    Biweekly,
    #[serde(rename = "mensal")]
    Monthly,
}

impl TirePressureCheck {
    pub fn label(&self) -> &'static str {
        match self {
            TirePressureCheck::Daily => "Daily",
            TirePressureCheck::Weekly => "Weekly",
            TirePressureCheck::Biweekly => "Biweekly",
            TirePressureCheck::Monthly => "Monthly",
        }
    }

    /// Portuguese label used in customer-facing reports
    pub fn label_pt(&self) -> &'static str {
        match self {
            TirePressureCheck::Daily => "Diária",
            TirePressureCheck::Weekly => "Semanal",
            TirePressureCheck::Biweekly => "Quinzenal",
            TirePressureCheck::Monthly => "Mensal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_serialize_as_string() {
        let json = serde_json::to_string(&RetreadingCycles::Two).unwrap();
        assert_eq!(json, "\"2\"");
    }

    #[test]
    fn test_cycles_accept_string_and_number() {
        let from_str: RetreadingCycles = serde_json::from_str("\"1\"").unwrap();
        let from_num: RetreadingCycles = serde_json::from_str("1").unwrap();
        assert_eq!(from_str, RetreadingCycles::One);
        assert_eq!(from_num, RetreadingCycles::One);
    }

    #[test]
    fn test_cycles_reject_out_of_range() {
        assert!(serde_json::from_str::<RetreadingCycles>("\"3\"").is_err());
        assert!(serde_json::from_str::<RetreadingCycles>("7").is_err());
        assert!(serde_json::from_str::<RetreadingCycles>("\"two\"").is_err());
    }

    #[test]
    fn test_cycles_count() {
        assert_eq!(RetreadingCycles::Zero.count(), 0);
        assert_eq!(RetreadingCycles::Two.count(), 2);
        assert!(!RetreadingCycles::Zero.has_retreads());
        assert!(RetreadingCycles::One.has_retreads());
    }

    #[test]
    fn test_pressure_check_wire_names() {
        let check: TirePressureCheck = serde_json::from_str("\"quinzenal\"").unwrap();
        assert_eq!(check, TirePressureCheck::Biweekly);
        assert_eq!(
            serde_json::to_string(&TirePressureCheck::Daily).unwrap(),
            "\"diaria\""
        );
    }
}
