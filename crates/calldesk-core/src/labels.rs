use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed label vocabulary whose wire form is the display string.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum! {
    /// Conversation subject detected anywhere in a call.
    Topic {
        Coverage => "coverage",
        Damage => "damage",
        Claims => "claims",
        Deductible => "deductible",
        Water => "water",
        Roof => "roof",
        Weather => "weather",
        Address => "address",
        Policy => "policy",
    }
}

label_enum! {
    /// How the call ended, judged from the final utterance.
    Resolution {
        Pending => "Pending",
        TransferredToHumanAgent => "Transferred to Human Agent",
        Resolved => "Resolved",
        CallbackScheduled => "Callback Scheduled",
        InProgress => "In Progress",
    }
}

label_enum! {
    Sentiment {
        Positive => "Positive",
        Negative => "Negative",
        Neutral => "Neutral",
    }
}

label_enum! {
    /// Reported by the call source via `transferredToAgent`.
    Outcome {
        TransferredToAgent => "Transferred to Agent",
        Resolved => "Resolved",
    }
}

label_enum! {
    /// Customer intent, judged from the opening utterance.
    Intent {
        Question => "Question",
        Complaint => "Complaint",
        Request => "Request",
        Information => "Information",
        GeneralInquiry => "General Inquiry",
        Unknown => "Unknown",
    }
}

label_enum! {
    ActionItem {
        SendEmail => "Send email to customer",
        ScheduleCallback => "Schedule callback",
        ProcessClaim => "Process claim",
        SendDocuments => "Send documents",
    }
}

label_enum! {
    CoverageType {
        Dwelling => "Dwelling Coverage",
        WaterDamage => "Water Damage Coverage",
        WeatherStorm => "Weather/Storm Coverage",
        Roof => "Roof Coverage",
    }
}

impl Outcome {
    pub fn from_transferred(transferred_to_agent: bool) -> Self {
        if transferred_to_agent {
            Outcome::TransferredToAgent
        } else {
            Outcome::Resolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_as_display_strings() {
        assert_eq!(
            serde_json::to_string(&Resolution::TransferredToHumanAgent).unwrap(),
            r#""Transferred to Human Agent""#
        );
        assert_eq!(serde_json::to_string(&Topic::Roof).unwrap(), r#""roof""#);
        assert_eq!(
            serde_json::to_string(&CoverageType::WeatherStorm).unwrap(),
            r#""Weather/Storm Coverage""#
        );
    }

    #[test]
    fn labels_roundtrip_from_wire() {
        let intent: Intent = serde_json::from_str(r#""General Inquiry""#).unwrap();
        assert_eq!(intent, Intent::GeneralInquiry);
        assert!(serde_json::from_str::<Sentiment>(r#""positive""#).is_err());
    }

    #[test]
    fn display_matches_as_str() {
        for t in Topic::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!(ActionItem::ScheduleCallback.to_string(), "Schedule callback");
    }

    #[test]
    fn outcome_follows_transfer_flag() {
        assert_eq!(Outcome::from_transferred(true), Outcome::TransferredToAgent);
        assert_eq!(Outcome::from_transferred(false), Outcome::Resolved);
    }
}
