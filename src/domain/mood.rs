//! The five-step mood scale

use crate::error::MoodiaryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A mood on an ordered five-value scale, mapped to ordinals 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    VerySad,
    Sad,
    Neutral,
    Happy,
    VeryHappy,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::VerySad,
        Mood::Sad,
        Mood::Neutral,
        Mood::Happy,
        Mood::VeryHappy,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            Mood::VerySad => 1,
            Mood::Sad => 2,
            Mood::Neutral => 3,
            Mood::Happy => 4,
            Mood::VeryHappy => 5,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Mood> {
        match ordinal {
            1 => Some(Mood::VerySad),
            2 => Some(Mood::Sad),
            3 => Some(Mood::Neutral),
            4 => Some(Mood::Happy),
            5 => Some(Mood::VeryHappy),
            _ => None,
        }
    }

    /// Map a mean ordinal to the nearest mood, rounding half up.
    ///
    /// Ties resolve toward the happier mood; values outside 1..=5 are clamped.
    pub fn from_mean(mean: f64) -> Option<Mood> {
        if mean.is_nan() {
            return None;
        }
        let rounded = (mean + 0.5).floor().clamp(1.0, 5.0);
        Mood::from_ordinal(rounded as u8)
    }

    /// Wire token used in persisted collections
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::VerySad => "verysad",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::VeryHappy => "veryhappy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::VerySad => "Very sad",
            Mood::Sad => "Not so good",
            Mood::Neutral => "Okay",
            Mood::Happy => "Happy",
            Mood::VeryHappy => "Very happy",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::VerySad => "😢",
            Mood::Sad => "🙁",
            Mood::Neutral => "😐",
            Mood::Happy => "🙂",
            Mood::VeryHappy => "😄",
        }
    }

    /// Chart colour for this mood
    pub fn color_hex(self) -> &'static str {
        match self {
            Mood::VerySad => "#ea384c",
            Mood::Sad => "#E5DEFF",
            Mood::Neutral => "#FDE1D3",
            Mood::Happy => "#FFDEE2",
            Mood::VeryHappy => "#F2FCE2",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = MoodiaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "verysad" | "1" => Ok(Mood::VerySad),
            "sad" | "2" => Ok(Mood::Sad),
            "neutral" | "3" => Ok(Mood::Neutral),
            "happy" | "4" => Ok(Mood::Happy),
            "veryhappy" | "5" => Ok(Mood::VeryHappy),
            _ => Err(MoodiaryError::Validation(format!(
                "unrecognised mood: '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_ordinal(mood.ordinal()), Some(mood));
        }
        assert_eq!(Mood::from_ordinal(0), None);
        assert_eq!(Mood::from_ordinal(6), None);
    }

    #[test]
    fn test_scale_is_ordered() {
        assert!(Mood::VerySad < Mood::Sad);
        assert!(Mood::Happy < Mood::VeryHappy);
    }

    #[test]
    fn test_parse_wire_tokens() {
        assert_eq!("veryhappy".parse::<Mood>().unwrap(), Mood::VeryHappy);
        assert_eq!("verysad".parse::<Mood>().unwrap(), Mood::VerySad);
        assert_eq!("neutral".parse::<Mood>().unwrap(), Mood::Neutral);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_separators() {
        assert_eq!("VERY_HAPPY".parse::<Mood>().unwrap(), Mood::VeryHappy);
        assert_eq!("very-sad".parse::<Mood>().unwrap(), Mood::VerySad);
        assert_eq!(" Happy ".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!("4".parse::<Mood>().unwrap(), Mood::Happy);
    }

    #[test]
    fn test_parse_unknown_mood_is_validation_error() {
        match "ecstatic".parse::<Mood>() {
            Err(MoodiaryError::Validation(msg)) => assert!(msg.contains("ecstatic")),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!("0".parse::<Mood>().is_err());
        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn test_from_mean_rounds_half_up() {
        assert_eq!(Mood::from_mean(2.5), Some(Mood::Neutral));
        assert_eq!(Mood::from_mean(3.5), Some(Mood::Happy));
        assert_eq!(Mood::from_mean(3.49), Some(Mood::Neutral));
        assert_eq!(Mood::from_mean(1.0), Some(Mood::VerySad));
        assert_eq!(Mood::from_mean(4.5), Some(Mood::VeryHappy));
    }

    #[test]
    fn test_from_mean_clamps_and_rejects_nan() {
        assert_eq!(Mood::from_mean(0.2), Some(Mood::VerySad));
        assert_eq!(Mood::from_mean(7.0), Some(Mood::VeryHappy));
        assert_eq!(Mood::from_mean(f64::NAN), None);
    }

    #[test]
    fn test_serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&Mood::VeryHappy).unwrap();
        assert_eq!(json, "\"veryhappy\"");
        let mood: Mood = serde_json::from_str("\"sad\"").unwrap();
        assert_eq!(mood, Mood::Sad);
    }
}
