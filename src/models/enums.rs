use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Sex {
    Male => "Male",
    Female => "Female",
});

str_enum!(TimingSlot {
    Morning => "Morning",
    Afternoon => "Afternoon",
    Evening => "Evening",
    Night => "Night",
});

str_enum!(DurationUnit {
    Day => "days",
    Week => "weeks",
    Month => "months",
});

str_enum!(OcrEngineKind {
    EasyOcr => "easyocr",
    Tesseract => "tesseract",
    PdfTextLayer => "pdf_text",
});

impl Sex {
    /// Case-insensitive parse, as labels come out of OCR in any case.
    pub fn parse_loose(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("male") {
            Some(Self::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Some(Self::Female)
        } else {
            None
        }
    }
}

impl TimingSlot {
    /// Clock time at which the reminder for this slot fires.
    /// Evening is not produced by any dosage code yet.
    pub fn notification_time(&self) -> &'static str {
        match self {
            Self::Morning => "08:00",
            Self::Afternoon => "12:00",
            Self::Evening => "18:00",
            Self::Night => "19:00",
        }
    }
}

impl DurationUnit {
    /// Parse a duration unit word, singular or plural, any case.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" => Some(Self::Day),
            "week" | "weeks" => Some(Self::Week),
            "month" | "months" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sex_round_trips_through_str() {
        assert_eq!(Sex::from_str("Male").unwrap(), Sex::Male);
        assert_eq!(Sex::Female.as_str(), "Female");
    }

    #[test]
    fn sex_from_str_is_strict() {
        let err = Sex::from_str("male").unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidEnum {
                field: "Sex".into(),
                value: "male".into()
            }
        );
    }

    #[test]
    fn sex_parse_loose_ignores_case() {
        assert_eq!(Sex::parse_loose("FEMALE"), Some(Sex::Female));
        assert_eq!(Sex::parse_loose("male"), Some(Sex::Male));
        assert_eq!(Sex::parse_loose("M"), None);
    }

    #[test]
    fn notification_times() {
        assert_eq!(TimingSlot::Morning.notification_time(), "08:00");
        assert_eq!(TimingSlot::Afternoon.notification_time(), "12:00");
        assert_eq!(TimingSlot::Evening.notification_time(), "18:00");
        assert_eq!(TimingSlot::Night.notification_time(), "19:00");
    }

    #[test]
    fn duration_unit_days() {
        assert_eq!(DurationUnit::parse_loose("Week"), Some(DurationUnit::Week));
        assert_eq!(DurationUnit::parse_loose("months"), Some(DurationUnit::Month));
        assert_eq!(DurationUnit::parse_loose("fortnight"), None);
        assert_eq!(DurationUnit::Week.days(), 7);
        assert_eq!(DurationUnit::Month.days(), 30);
    }

    #[test]
    fn serializes_with_display_name() {
        let json = serde_json::to_string(&TimingSlot::Night).unwrap();
        assert_eq!(json, "\"Night\"");
        let json = serde_json::to_string(&OcrEngineKind::EasyOcr).unwrap();
        assert_eq!(json, "\"easyocr\"");
    }
}
