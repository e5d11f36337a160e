#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display label for where the parameter sits relative to a meeting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Initial,
    Approaching,
    Returning,
}

impl Phase {
    pub fn classify(t: f64, meeting_time: f64) -> Self {
        if t <= 0.0 {
            Phase::Initial
        } else if t <= meeting_time {
            Phase::Approaching
        } else {
            Phase::Returning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::Approaching => "approaching",
            Phase::Returning => "returning",
        }
    }

    /// The meeting point marker is drawn once motion has begun.
    pub fn shows_meeting_marker(self) -> bool {
        self != Phase::Initial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_around_the_meeting_time() {
        assert_eq!(Phase::classify(0.0, 2.5), Phase::Initial);
        assert_eq!(Phase::classify(-2.0, 2.5), Phase::Initial);
        assert_eq!(Phase::classify(1.5, 2.5), Phase::Approaching);
        assert_eq!(Phase::classify(2.5, 2.5), Phase::Approaching);
        assert_eq!(Phase::classify(4.0, 2.5), Phase::Returning);
    }

    #[test]
    fn marker_hidden_only_before_start() {
        assert!(!Phase::Initial.shows_meeting_marker());
        assert!(Phase::Approaching.shows_meeting_marker());
        assert!(Phase::Returning.shows_meeting_marker());
        assert_eq!(Phase::Returning.label(), "returning");
    }
}
