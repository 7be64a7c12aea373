/*!
Tempora is a datetime library for the proleptic Gregorian calendar with
nanosecond precision.

The library is built around a small set of immutable value types:

* [`Instant`] is an absolute point on the timeline, independent of any
calendar or time zone.
* [`civil::Date`], [`civil::Time`] and [`civil::DateTime`] represent a
calendar date, a wall-clock time and their combination, without any time
zone attached.
* [`Duration`] is a signed span of time expressed as a mixture of calendar
units (years, months, weeks, days) and clock units (hours down to
nanoseconds).
* [`tz::TimeZone`] maps between civil datetimes and instants via a table of
UTC offset transitions, with explicit handling of the "gap" and "fold"
cases that occur around those transitions.

Every type supports checked arithmetic with durations, computing the
difference between two values with configurable largest/smallest units and
rounding, total ordering, and exact ISO 8601 parsing and printing.

# Example

```
use tempora::{civil::Date, ToDuration};

let start = Date::constant(2020, 1, 31);
let end = start.checked_add(1.month())?;
assert_eq!(end, Date::constant(2020, 2, 29));
assert_eq!(end.to_string(), "2020-02-29");
# Ok::<(), tempora::Error>(())
```

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
[`Error`]. When disabled, this crate only depends on `core` and `alloc`.
* **alloc** - Dynamic memory allocation. This crate requires it; it exists
as a distinct feature to keep the dependency surface explicit.
* **logging** - Emits trace-level log records from some internal routines
via the `log` crate.
* **serde** - Serializes and deserializes all value types through their
ISO 8601 string representations.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::{
    duration::{Duration, ToDuration},
    error::Error,
    instant::{Instant, InstantDifference, InstantRound},
    round::{RoundMode, Unit},
};

#[macro_use]
mod logging;

pub mod civil;
mod duration;
mod error;
pub mod fmt;
mod instant;
mod round;
pub mod tz;
mod util;
