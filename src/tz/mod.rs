/*!
Time zone support: offsets, transition-table time zones and local-time
disambiguation.

A [`TimeZone`] maps between absolute [`Instant`]s and civil
[`DateTime`]s. The instant-to-civil direction is a total function, but
the reverse is not: around a forward transition some wall-clock readings
never occur (a *gap*), and around a backward transition some occur twice
(a *fold*). [`TimeZone::to_ambiguous`] reports which case applies and
[`Disambiguation`] picks a policy for collapsing it to a single instant.

Time zones here are either fixed offsets or explicit transition tables
built with [`TimeZone::from_transitions`]. Loading system tzdata is out
of scope; a [`TimeZoneDatabase`] is a registry that applications fill
themselves, with fixed-offset names like `+05:30` always available.
*/

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use crate::{
    civil::DateTime,
    error::{err, Error, ErrorContext},
    instant::Instant,
};

pub use self::offset::Offset;

mod offset;

/// A mapping between absolute time and civil time.
///
/// Cloning a `TimeZone` is cheap: transition tables are held behind an
/// [`Arc`].
///
/// ```
/// use tempora::{civil::DateTime, tz::TimeZone};
///
/// let tz = TimeZone::fixed(tempora::tz::Offset::constant(-5));
/// let dt = DateTime::constant(2024, 6, 15, 9, 30, 0, 0);
/// let instant = tz.to_ambiguous(dt).unambiguous()?;
/// assert_eq!(instant.to_string(), "2024-06-15T14:30:00Z");
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct TimeZone {
    // `None` is UTC, so that the common case needs no allocation.
    kind: Option<Arc<TimeZoneKind>>,
}

#[derive(Debug, Eq, PartialEq)]
enum TimeZoneKind {
    Fixed(Offset),
    Table(TransitionTable),
}

#[derive(Debug, Eq, PartialEq)]
struct TransitionTable {
    name: Box<str>,
    /// The offset in effect before the first transition.
    initial: Offset,
    /// Transitions in strictly increasing order of instant.
    transitions: Vec<Transition>,
}

/// A change of UTC offset at a specific instant.
///
/// The offset applies from `at` (inclusive) until the next transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition {
    /// The instant the new offset takes effect.
    pub at: Instant,
    /// The offset in effect from that instant.
    pub offset: Offset,
}

impl TimeZone {
    /// The UTC time zone.
    pub const UTC: TimeZone = TimeZone { kind: None };

    /// Creates a time zone with one fixed offset and no transitions.
    pub fn fixed(offset: Offset) -> TimeZone {
        if offset == Offset::UTC {
            return TimeZone::UTC;
        }
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Fixed(offset))) }
    }

    /// Creates a time zone from an explicit table of offset transitions.
    ///
    /// `initial` is the offset in effect before the first transition.
    ///
    /// # Errors
    ///
    /// When the transitions are not in strictly increasing instant order,
    /// or when a transition repeats the offset already in effect.
    pub fn from_transitions<I>(
        name: &str,
        initial: Offset,
        transitions: I,
    ) -> Result<TimeZone, Error>
    where
        I: IntoIterator<Item = Transition>,
    {
        let transitions: Vec<Transition> = transitions.into_iter().collect();
        let mut previous_at: Option<Instant> = None;
        let mut previous_offset = initial;
        for t in &transitions {
            if let Some(at) = previous_at {
                if t.at <= at {
                    return Err(err!(
                        "transition at {at} in time zone {name} is not in \
                         strictly increasing order",
                        at = t.at,
                    ));
                }
            }
            if t.offset == previous_offset {
                return Err(err!(
                    "transition at {at} in time zone {name} repeats the \
                     offset {offset} already in effect",
                    at = t.at,
                    offset = t.offset,
                ));
            }
            previous_at = Some(t.at);
            previous_offset = t.offset;
        }
        let table = TransitionTable {
            name: name.to_string().into_boxed_str(),
            initial,
            transitions,
        };
        Ok(TimeZone { kind: Some(Arc::new(TimeZoneKind::Table(table))) })
    }

    /// Returns the name of this time zone, when it has one. Fixed-offset
    /// zones (including UTC) have no name.
    pub fn name(&self) -> Option<&str> {
        match self.kind.as_deref() {
            Some(TimeZoneKind::Table(table)) => Some(&table.name),
            _ => None,
        }
    }

    /// Returns the offset in effect at the given instant.
    pub fn to_offset(&self, instant: Instant) -> Offset {
        let table = match self.kind.as_deref() {
            None => return Offset::UTC,
            Some(TimeZoneKind::Fixed(offset)) => return *offset,
            Some(TimeZoneKind::Table(table)) => table,
        };
        // Index of the first transition strictly after `instant`.
        let upper = table
            .transitions
            .partition_point(|t| t.at <= instant);
        if upper == 0 {
            table.initial
        } else {
            table.transitions[upper - 1].offset
        }
    }

    /// Localizes an instant to the civil datetime this zone shows at that
    /// moment.
    pub fn to_datetime(&self, instant: Instant) -> Result<DateTime, Error> {
        self.to_offset(instant).to_datetime(instant)
    }

    /// Resolves a civil datetime against this zone, reporting whether it
    /// is unambiguous, repeated by a fold or skipped by a gap.
    ///
    /// This never fails; collapsing the result to an [`Instant`] can.
    pub fn to_ambiguous(&self, datetime: DateTime) -> AmbiguousDateTime {
        let offset = match self.kind.as_deref() {
            None => {
                return AmbiguousDateTime::new(
                    datetime,
                    AmbiguousOffset::Unambiguous { offset: Offset::UTC },
                );
            }
            Some(TimeZoneKind::Fixed(offset)) => *offset,
            Some(TimeZoneKind::Table(_)) => {
                return self.to_ambiguous_table(datetime);
            }
        };
        AmbiguousDateTime::new(
            datetime,
            AmbiguousOffset::Unambiguous { offset },
        )
    }

    fn to_ambiguous_table(&self, datetime: DateTime) -> AmbiguousDateTime {
        // Probe the offsets in effect a bit before and after the wall
        // time read as if it were UTC. Offsets never exceed 26 hours, so
        // a two day margin brackets every transition that could matter.
        let margin = 2 * 86_400 * 1_000_000_000i128;
        let guess = datetime.to_nanosecond();
        let probe = |nanos: i128| {
            let clamped = nanos
                .clamp(Instant::MIN.as_nanosecond(), Instant::MAX.as_nanosecond());
            // In range by construction.
            let instant = Instant::from_nanosecond(clamped)
                .expect("clamped nanosecond count is in range");
            self.to_offset(instant)
        };
        let before = probe(guess - margin);
        let after = probe(guess + margin);
        if before == after {
            return AmbiguousDateTime::new(
                datetime,
                AmbiguousOffset::Unambiguous { offset: before },
            );
        }
        // An offset is a valid reading when resolving the wall time
        // through it lands at an instant where that offset is in effect.
        let is_valid = |offset: Offset| {
            offset
                .to_instant(datetime)
                .map(|instant| self.to_offset(instant) == offset)
                .unwrap_or(false)
        };
        // Also probe the wall time itself, in case two transitions fall
        // within the margin and only an intermediate offset validates.
        let middle = probe(guess);
        let mut valid = [None, None];
        for candidate in [before, middle, after] {
            if valid.contains(&Some(candidate)) || !is_valid(candidate) {
                continue;
            }
            if valid[0].is_none() {
                valid[0] = Some(candidate);
            } else if valid[1].is_none() {
                valid[1] = Some(candidate);
            }
        }
        let kind = match valid {
            [Some(offset), None] => AmbiguousOffset::Unambiguous { offset },
            [Some(first), Some(second)] => {
                AmbiguousOffset::Fold { before: first, after: second }
            }
            _ => AmbiguousOffset::Gap { before, after },
        };
        trace!("resolved {datetime} in {tz:?} to {kind:?}", tz = self);
        AmbiguousDateTime::new(datetime, kind)
    }

    /// Resolves a civil datetime to an instant using the given
    /// disambiguation policy.
    pub fn to_instant_with(
        &self,
        datetime: DateTime,
        disambiguation: Disambiguation,
    ) -> Result<Instant, Error> {
        self.to_ambiguous(datetime).disambiguate(disambiguation)
    }

    /// Resolves a civil datetime to an instant with the default policy,
    /// [`Disambiguation::Earlier`].
    pub fn to_instant(&self, datetime: DateTime) -> Result<Instant, Error> {
        self.to_instant_with(datetime, Disambiguation::Earlier)
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind.as_deref() {
            None => write!(f, "TimeZone(UTC)"),
            Some(TimeZoneKind::Fixed(offset)) => {
                write!(f, "TimeZone({offset})")
            }
            Some(TimeZoneKind::Table(table)) => {
                write!(f, "TimeZone({name})", name = table.name)
            }
        }
    }
}

/// A possibly ambiguous mapping from a civil offset reading.
///
/// Produced by [`TimeZone::to_ambiguous`] as part of an
/// [`AmbiguousDateTime`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AmbiguousOffset {
    /// The civil datetime occurs exactly once.
    Unambiguous {
        /// The single offset in effect.
        offset: Offset,
    },
    /// The civil datetime was skipped by a forward transition and never
    /// occurs on a clock in this zone.
    Gap {
        /// The offset in effect just before the transition.
        before: Offset,
        /// The offset in effect from the transition onward.
        after: Offset,
    },
    /// The civil datetime occurs twice across a backward transition.
    Fold {
        /// The offset in effect the first time the clock shows this
        /// reading.
        before: Offset,
        /// The offset in effect the second time.
        after: Offset,
    },
}

/// A civil datetime paired with its resolution against a time zone.
///
/// ```
/// use tempora::{
///     civil::DateTime,
///     tz::{Disambiguation, Offset, TimeZone, Transition},
/// };
///
/// // A sketch of a Europe-style spring-forward at 2024-03-31T01:00Z.
/// let tz = TimeZone::from_transitions(
///     "Sketch/Europe",
///     Offset::constant(1),
///     [Transition {
///         at: "2024-03-31T01:00:00Z".parse()?,
///         offset: Offset::constant(2),
///     }],
/// )?;
/// // 02:30 local never happened that night.
/// let ambiguous = tz.to_ambiguous(
///     DateTime::constant(2024, 3, 31, 2, 30, 0, 0),
/// );
/// assert!(ambiguous.is_ambiguous());
/// assert_eq!(
///     ambiguous.disambiguate(Disambiguation::Earlier)?.to_string(),
///     "2024-03-31T00:30:00Z",
/// );
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AmbiguousDateTime {
    datetime: DateTime,
    offset: AmbiguousOffset,
}

impl AmbiguousDateTime {
    fn new(datetime: DateTime, offset: AmbiguousOffset) -> AmbiguousDateTime {
        AmbiguousDateTime { datetime, offset }
    }

    /// Returns the civil datetime that was resolved.
    pub fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// Returns how the datetime mapped onto this zone's offsets.
    pub fn offset(&self) -> AmbiguousOffset {
        self.offset
    }

    /// Returns true for a gap or a fold.
    pub fn is_ambiguous(&self) -> bool {
        !matches!(self.offset, AmbiguousOffset::Unambiguous { .. })
    }

    /// Returns the instant for an unambiguous datetime, and an error for
    /// a gap or a fold.
    pub fn unambiguous(&self) -> Result<Instant, Error> {
        match self.offset {
            AmbiguousOffset::Unambiguous { offset } => {
                offset.to_instant(self.datetime)
            }
            AmbiguousOffset::Gap { .. } => Err(Error::ambiguous(
                format_args!(
                    "{datetime} was skipped by a forward transition",
                    datetime = self.datetime,
                ),
            )),
            AmbiguousOffset::Fold { .. } => Err(Error::ambiguous(
                format_args!(
                    "{datetime} is repeated across a backward transition",
                    datetime = self.datetime,
                ),
            )),
        }
    }

    /// Returns the earlier of the possible instants.
    ///
    /// For a fold this is the first occurrence. For a gap it is the
    /// instant just as if the clock had not yet jumped forward, which
    /// precedes the transition.
    pub fn earlier(&self) -> Result<Instant, Error> {
        let offset = match self.offset {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Gap { after, .. } => after,
            AmbiguousOffset::Fold { before, .. } => before,
        };
        offset.to_instant(self.datetime)
    }

    /// Returns the later of the possible instants.
    pub fn later(&self) -> Result<Instant, Error> {
        let offset = match self.offset {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Gap { before, .. } => before,
            AmbiguousOffset::Fold { after, .. } => after,
        };
        offset.to_instant(self.datetime)
    }

    /// Collapses this resolution to a single instant using the given
    /// policy.
    pub fn disambiguate(
        &self,
        disambiguation: Disambiguation,
    ) -> Result<Instant, Error> {
        match disambiguation {
            Disambiguation::Earlier => self.earlier(),
            Disambiguation::Later => self.later(),
            Disambiguation::Reject => self.unambiguous(),
        }
    }
}

/// The policy for collapsing an ambiguous civil datetime to an instant.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Disambiguation {
    /// Pick the earlier possible instant. For a gap, this is the moment
    /// the skipped reading would have occurred had the clock not jumped.
    ///
    /// This is the default: it is deterministic under repeated
    /// application, unlike policies that depend on the transition
    /// direction.
    #[default]
    Earlier,
    /// Pick the later possible instant.
    Later,
    /// Error on any gap or fold.
    Reject,
}

impl core::str::FromStr for Disambiguation {
    type Err = Error;

    fn from_str(string: &str) -> Result<Disambiguation, Error> {
        match string {
            "earlier" => Ok(Disambiguation::Earlier),
            "later" => Ok(Disambiguation::Later),
            "reject" => Ok(Disambiguation::Reject),
            _ => Err(Error::option(format_args!(
                "unrecognized disambiguation policy {string:?}",
            ))),
        }
    }
}

/// A registry of named time zones.
///
/// The database starts empty apart from implicit entries: `UTC` and
/// fixed-offset names like `+05:30` or `-08` always resolve. Applications
/// register transition-table zones under their names with
/// [`TimeZoneDatabase::add`].
#[derive(Clone, Debug, Default)]
pub struct TimeZoneDatabase {
    zones: BTreeMap<String, TimeZone>,
}

impl TimeZoneDatabase {
    /// Creates an empty database.
    pub fn new() -> TimeZoneDatabase {
        TimeZoneDatabase::default()
    }

    /// Registers a named time zone, replacing any previous zone with the
    /// same name.
    ///
    /// # Errors
    ///
    /// When the time zone has no name (fixed-offset zones resolve
    /// implicitly and cannot be registered).
    pub fn add(&mut self, tz: TimeZone) -> Result<(), Error> {
        let Some(name) = tz.name() else {
            return Err(err!(
                "only named time zones can be registered in a database",
            ));
        };
        self.zones.insert(name.to_string(), tz);
        Ok(())
    }

    /// Looks up a time zone by name.
    ///
    /// `UTC` (case insensitive) and offset literals like `+05:30` resolve
    /// without registration.
    ///
    /// # Errors
    ///
    /// When the name is neither registered nor a recognized literal.
    pub fn get(&self, name: &str) -> Result<TimeZone, Error> {
        if name.eq_ignore_ascii_case("utc") {
            return Ok(TimeZone::UTC);
        }
        if let Some(tz) = self.zones.get(name) {
            return Ok(tz.clone());
        }
        if name.starts_with(['+', '-']) {
            let offset: Offset = name
                .parse()
                .with_context(|| err!("invalid offset time zone {name:?}"))?;
            return Ok(TimeZone::fixed(offset));
        }
        Err(Error::unknown_time_zone(name))
    }

    /// Returns an iterator over the registered zone names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(|name| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::civil::DateTime;

    use super::*;

    fn spring_forward() -> TimeZone {
        // At 2024-03-31T01:00Z the offset moves from +01 to +02, so the
        // local clock jumps from 02:00 to 03:00.
        TimeZone::from_transitions(
            "Test/Spring",
            Offset::constant(1),
            [Transition {
                at: "2024-03-31T01:00:00Z".parse().unwrap(),
                offset: Offset::constant(2),
            }],
        )
        .unwrap()
    }

    fn fall_back() -> TimeZone {
        // At 2024-10-27T01:00Z the offset moves from +02 to +01, so the
        // local clock falls from 03:00 back to 02:00.
        TimeZone::from_transitions(
            "Test/Fall",
            Offset::constant(2),
            [Transition {
                at: "2024-10-27T01:00:00Z".parse().unwrap(),
                offset: Offset::constant(1),
            }],
        )
        .unwrap()
    }

    #[test]
    fn utc_is_always_unambiguous() {
        let dt = DateTime::constant(2024, 3, 31, 2, 30, 0, 0);
        let ambiguous = TimeZone::UTC.to_ambiguous(dt);
        assert!(!ambiguous.is_ambiguous());
        assert_eq!(
            ambiguous.unambiguous().unwrap().to_string(),
            "2024-03-31T02:30:00Z",
        );
    }

    #[test]
    fn offset_lookup_uses_latest_transition() {
        let tz = spring_forward();
        let before: Instant = "2024-03-31T00:59:59Z".parse().unwrap();
        let at: Instant = "2024-03-31T01:00:00Z".parse().unwrap();
        assert_eq!(tz.to_offset(before), Offset::constant(1));
        assert_eq!(tz.to_offset(at), Offset::constant(2));
        assert_eq!(tz.to_offset(Instant::MIN), Offset::constant(1));
        assert_eq!(tz.to_offset(Instant::MAX), Offset::constant(2));
    }

    #[test]
    fn gap_resolution() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tz = spring_forward();
        // 02:30 local never happened.
        let dt = DateTime::constant(2024, 3, 31, 2, 30, 0, 0);
        let ambiguous = tz.to_ambiguous(dt);
        assert_eq!(
            ambiguous.offset(),
            AmbiguousOffset::Gap {
                before: Offset::constant(1),
                after: Offset::constant(2),
            },
        );
        assert!(ambiguous.unambiguous().unwrap_err().is_ambiguous_local_time());
        // Earlier reads the wall time at the post-transition offset,
        // landing before the transition.
        assert_eq!(
            ambiguous.earlier().unwrap().to_string(),
            "2024-03-31T00:30:00Z",
        );
        assert_eq!(
            ambiguous.later().unwrap().to_string(),
            "2024-03-31T01:30:00Z",
        );
        // The two candidates bracket the transition.
        let transition: Instant = "2024-03-31T01:00:00Z".parse().unwrap();
        assert!(ambiguous.earlier().unwrap() < transition);
        assert!(transition < ambiguous.later().unwrap());
    }

    #[test]
    fn fold_resolution() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tz = fall_back();
        // 02:30 local happened twice.
        let dt = DateTime::constant(2024, 10, 27, 2, 30, 0, 0);
        let ambiguous = tz.to_ambiguous(dt);
        assert_eq!(
            ambiguous.offset(),
            AmbiguousOffset::Fold {
                before: Offset::constant(2),
                after: Offset::constant(1),
            },
        );
        assert_eq!(
            ambiguous.earlier().unwrap().to_string(),
            "2024-10-27T00:30:00Z",
        );
        assert_eq!(
            ambiguous.later().unwrap().to_string(),
            "2024-10-27T01:30:00Z",
        );
        assert!(ambiguous.disambiguate(Disambiguation::Reject).is_err());
    }

    #[test]
    fn unambiguous_near_transition() {
        let tz = spring_forward();
        let before = DateTime::constant(2024, 3, 31, 1, 59, 59, 0);
        assert!(!tz.to_ambiguous(before).is_ambiguous());
        let after = DateTime::constant(2024, 3, 31, 3, 0, 0, 0);
        let ambiguous = tz.to_ambiguous(after);
        assert!(!ambiguous.is_ambiguous());
        assert_eq!(
            ambiguous.unambiguous().unwrap().to_string(),
            "2024-03-31T01:00:00Z",
        );
    }

    #[test]
    fn localize_round_trip() {
        let tz = spring_forward();
        let instant: Instant = "2024-06-15T12:00:00Z".parse().unwrap();
        let local = tz.to_datetime(instant).unwrap();
        assert_eq!(local, DateTime::constant(2024, 6, 15, 14, 0, 0, 0));
        assert_eq!(tz.to_instant(local).unwrap(), instant);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let t1 = Transition {
            at: "2024-03-31T01:00:00Z".parse().unwrap(),
            offset: Offset::constant(2),
        };
        // Out of order.
        let t0 = Transition {
            at: "2024-01-01T00:00:00Z".parse().unwrap(),
            offset: Offset::constant(1),
        };
        assert!(TimeZone::from_transitions(
            "Test/Bad",
            Offset::constant(1),
            [t1, t0],
        )
        .is_err());
        // Repeats the offset already in effect.
        assert!(TimeZone::from_transitions(
            "Test/Bad",
            Offset::constant(2),
            [t1],
        )
        .is_err());
    }

    #[test]
    fn database_lookup() {
        let mut db = TimeZoneDatabase::new();
        db.add(spring_forward()).unwrap();
        assert_eq!(db.get("Test/Spring").unwrap(), spring_forward());
        assert_eq!(db.get("UTC").unwrap(), TimeZone::UTC);
        assert_eq!(
            db.get("+05:30").unwrap(),
            TimeZone::fixed(Offset::from_seconds(19_800).unwrap()),
        );
        let err = db.get("America/New_York").unwrap_err();
        assert!(err.is_unknown_time_zone());
        assert!(err.to_string().contains("America/New_York"));
        assert!(db.add(TimeZone::fixed(Offset::constant(3))).is_err());
        assert_eq!(db.names().collect::<Vec<_>>(), ["Test/Spring"]);
    }
}
