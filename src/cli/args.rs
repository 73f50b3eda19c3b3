use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Amount, DateValue, RecordId};
use crate::errors::{FleetError, FleetResult};

/// Positional arguments plus `--name value` options.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Args {
    positionals: Vec<String>,
    options: BTreeMap<String, String>,
}

impl Args {
    pub fn parse<I, S>(raw: I) -> FleetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Args::default();
        let mut iter = raw.into_iter().map(Into::<String>::into);
        while let Some(token) = iter.next() {
            if let Some(name) = token.strip_prefix("--") {
                let (name, value) = match name.split_once('=') {
                    Some((name, value)) => (name.to_string(), value.to_string()),
                    None => {
                        let value = iter.next().ok_or_else(|| {
                            FleetError::invalid(format!("option --{name} needs a value"))
                        })?;
                        (name.to_string(), value)
                    }
                };
                args.options.insert(name, value);
            } else {
                args.positionals.push(token);
            }
        }
        Ok(args)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    pub fn required(&self, index: usize, what: &str) -> FleetResult<&str> {
        self.positional(index)
            .ok_or_else(|| FleetError::invalid(format!("missing {what}")))
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn take_option(&mut self, name: &str) -> Option<String> {
        self.options.remove(name)
    }

    /// Splits off the command name, leaving its arguments.
    pub fn shift(&mut self) -> Option<String> {
        if self.positionals.is_empty() {
            None
        } else {
            Some(self.positionals.remove(0))
        }
    }

    pub fn parsed_option<T>(&self, name: &str) -> FleetResult<Option<T>>
    where
        T: FromStr<Err = FleetError>,
    {
        self.option(name).map(str::parse::<T>).transpose()
    }
}

pub fn parse_date(value: &str) -> FleetResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FleetError::invalid(format!("expected YYYY-MM-DD, got `{value}`")))
}

/// Accepts anything a stored date string may hold: a date, a date-time or
/// RFC 3339.
pub fn parse_instant(value: &str) -> FleetResult<NaiveDateTime> {
    DateValue::Text(value.trim().to_string())
        .to_naive()
        .ok_or_else(|| FleetError::invalid(format!("unreadable date `{value}`")))
}

pub fn parse_amount(value: &str) -> FleetResult<Amount> {
    value
        .trim()
        .parse()
        .map_err(|_| FleetError::invalid(format!("expected a whole amount, got `{value}`")))
}

pub fn parse_id(value: &str) -> FleetResult<RecordId> {
    value.trim().parse()
}
