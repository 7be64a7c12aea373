/*!
Serde integration for the datetime value types.

Every type serializes to (and deserializes from) its ISO 8601 string
representation, matching its `Display` and `FromStr` impls. There is no
binary or structured representation; the interchange format is the
string format.
*/

use core::fmt;

use serde::{
    de::{Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};

use crate::{
    civil::{Date, DateTime, Time},
    duration::Duration,
    instant::Instant,
    tz::Offset,
};

macro_rules! string_serde {
    ($type:ty, $expecting:literal) => {
        impl Serialize for $type {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$type, D::Error> {
                struct StringVisitor;

                impl<'de> Visitor<'de> for StringVisitor {
                    type Value = $type;

                    fn expecting(
                        &self,
                        f: &mut fmt::Formatter,
                    ) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: serde::de::Error>(
                        self,
                        value: &str,
                    ) -> Result<$type, E> {
                        value.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(StringVisitor)
            }
        }
    };
}

string_serde!(Date, "an ISO 8601 date string");
string_serde!(Time, "an ISO 8601 time string");
string_serde!(DateTime, "an ISO 8601 datetime string");
string_serde!(Instant, "an ISO 8601 datetime string with a UTC offset");
string_serde!(Duration, "an ISO 8601 duration string");
string_serde!(Offset, "an ISO 8601 UTC offset string");

#[cfg(test)]
mod tests {
    use crate::ToDuration;

    use super::*;

    #[test]
    fn date() {
        let date = Date::constant(2024, 6, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-15\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);
        assert!(serde_json::from_str::<Date>("\"2024-02-30\"").is_err());
    }

    #[test]
    fn datetime() {
        let dt = DateTime::constant(2024, 6, 15, 13, 37, 31, 500_000_000);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2024-06-15T13:37:31.5\"");
        assert_eq!(serde_json::from_str::<DateTime>(&json).unwrap(), dt);
    }

    #[test]
    fn instant() {
        let instant: Instant = "2020-02-29T12:30:00Z".parse().unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2020-02-29T12:30:00Z\"");
        assert_eq!(serde_json::from_str::<Instant>(&json).unwrap(), instant);
        // The offset designator is required for instants.
        assert!(
            serde_json::from_str::<Instant>("\"2020-02-29T12:30:00\"")
                .is_err()
        );
    }

    #[test]
    fn duration() {
        let duration = 1.year().days(3).milliseconds(500);
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, "\"P1Y3DT0.5S\"");
        assert_eq!(
            serde_json::from_str::<Duration>(&json).unwrap(),
            duration,
        );
    }

    #[test]
    fn offset() {
        let offset = Offset::constant(-5);
        let json = serde_json::to_string(&offset).unwrap();
        assert_eq!(json, "\"-05:00\"");
        assert_eq!(serde_json::from_str::<Offset>(&json).unwrap(), offset);
    }
}
