/*!
Support for the ISO 8601 interchange formats for dates, times, datetimes,
instants and durations.

These are the formats produced by the `Display` impls and accepted by the
`FromStr` impls on the corresponding types. A quick tour:

```text
2024-06-15                            civil date
13:37:31.123                          wall-clock time
2024-06-15T13:37:31                   civil datetime
2024-06-15T13:37:31-05:00             instant (offset required)
2024-06-15T18:37:31Z                  the same instant
2024-06-15T14:00:00[Europe/Berlin]    instant resolved via a zone database
P1Y2M3DT4H5M6.5S                      duration
```

Parsing is strict about structure but lenient about case (`t`, `z` and
duration designators may be lowercase) and about basic versus extended
offset forms.
*/

pub use self::{
    parser::{DateTimeParser, DurationParser},
    printer::{DateTimePrinter, DurationPrinter},
};

mod parser;
mod printer;

pub(crate) static DEFAULT_DATETIME_PARSER: DateTimeParser =
    DateTimeParser::new();
pub(crate) static DEFAULT_DATETIME_PRINTER: DateTimePrinter =
    DateTimePrinter::new();
pub(crate) static DEFAULT_DURATION_PARSER: DurationParser =
    DurationParser::new();
pub(crate) static DEFAULT_DURATION_PRINTER: DurationPrinter =
    DurationPrinter::new();
