use serde::{Deserialize, Serialize};

/// Toolbar badge background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Orange,
    Red,
}

impl BadgeColor {
    pub fn for_score(score: u8) -> Self {
        if score < 50 {
            Self::Red
        } else if score < 70 {
            Self::Orange
        } else {
            Self::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#4CAF50",
            Self::Orange => "#FF9800",
            Self::Red => "#F44336",
        }
    }
}

/// What the toolbar shows for a tab: the score on a colored background.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
}

impl Badge {
    pub fn for_score(score: u8) -> Self {
        Self {
            text: score.to_string(),
            color: BadgeColor::for_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_bands() {
        assert_eq!(BadgeColor::for_score(100), BadgeColor::Green);
        assert_eq!(BadgeColor::for_score(70), BadgeColor::Green);
        assert_eq!(BadgeColor::for_score(69), BadgeColor::Orange);
        assert_eq!(BadgeColor::for_score(50), BadgeColor::Orange);
        assert_eq!(BadgeColor::for_score(49), BadgeColor::Red);
    }

    #[test]
    fn badge_text_is_score() {
        let badge = Badge::for_score(7);
        assert_eq!(badge.text, "7");
        assert_eq!(badge.color.hex(), "#F44336");
    }
}
