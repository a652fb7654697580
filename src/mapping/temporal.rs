use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::mapping::{Result, Value};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
// Naive values keep the trailing `Z` even though no offset is attached.
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
const DATETIME_OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]");

/// Temporal value recognized in a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
	/// Date-only string.
	Date(Date),
	/// Date and time with `Z` or no offset.
	DateTime(PrimitiveDateTime),
	/// Date and time with an explicit numeric offset.
	OffsetDateTime(OffsetDateTime),
}

impl From<Temporal> for Value {
	fn from(value: Temporal) -> Self {
		match value {
			Temporal::Date(date) => Self::Date(date),
			Temporal::DateTime(datetime) => Self::DateTime(datetime),
			Temporal::OffsetDateTime(datetime) => Self::OffsetDateTime(datetime),
		}
	}
}

/// Format as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> Result<String> {
	Ok(date.format(DATE_FORMAT)?)
}

/// Format as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_datetime(datetime: PrimitiveDateTime) -> Result<String> {
	Ok(datetime.format(DATETIME_FORMAT)?)
}

/// Format as `YYYY-MM-DDTHH:MM:SS±HHMM`.
pub fn format_offset_datetime(datetime: OffsetDateTime) -> Result<String> {
	Ok(datetime.format(DATETIME_OFFSET_FORMAT)?)
}

/// Parse an ISO-8601 date or datetime; `None` when the text matches neither grammar.
///
/// Dates are `YYYY-MM-DD` or `YYYYMMDD`. An optional `T` time part is `HH[:MM[:SS]]`
/// or `HH[MM[SS]]`, seconds optionally followed by a `.`/`,` fraction, then `Z`,
/// `±HH:MM`, `±HHMM`, `±HH` or nothing. `Z` and a missing offset both yield a naive value.
pub fn parse(input: &str) -> Option<Temporal> {
	let mut scanner = Scanner::new(input);
	let date = scanner.date()?;
	if scanner.is_done() {
		return Some(Temporal::Date(date));
	}
	if !scanner.eat(b'T') {
		return None;
	}

	let time = scanner.time()?;
	let offset = scanner.offset()?;
	if !scanner.is_done() {
		return None;
	}

	let naive = PrimitiveDateTime::new(date, time);
	Some(match offset {
		Some(offset) => Temporal::OffsetDateTime(naive.assume_offset(offset)),
		None => Temporal::DateTime(naive),
	})
}

struct Scanner<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Scanner<'a> {
	fn new(input: &'a str) -> Self {
		Self {
			bytes: input.as_bytes(),
			pos: 0,
		}
	}

	fn is_done(&self) -> bool {
		self.pos == self.bytes.len()
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn peek_digit(&self) -> bool {
		self.peek().is_some_and(|byte| byte.is_ascii_digit())
	}

	fn eat(&mut self, byte: u8) -> bool {
		if self.peek() == Some(byte) {
			self.pos += 1;
			return true;
		}
		false
	}

	/// Read exactly `count` ASCII digits.
	fn digits(&mut self, count: usize) -> Option<u32> {
		let end = self.pos.checked_add(count)?;
		let slice = self.bytes.get(self.pos..end)?;
		if !slice.iter().all(u8::is_ascii_digit) {
			return None;
		}
		self.pos = end;
		Some(slice.iter().fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0')))
	}

	fn date(&mut self) -> Option<Date> {
		let year = self.digits(4)?;
		let (month, day) = if self.eat(b'-') {
			let month = self.digits(2)?;
			if !self.eat(b'-') {
				return None;
			}
			(month, self.digits(2)?)
		} else {
			(self.digits(2)?, self.digits(2)?)
		};

		let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
		Date::from_calendar_date(i32::try_from(year).ok()?, month, u8::try_from(day).ok()?).ok()
	}

	fn time(&mut self) -> Option<Time> {
		let hour = self.digits(2)?;
		let mut minute = 0;
		let mut second = 0;
		let mut micro = 0;

		if self.eat(b':') {
			minute = self.digits(2)?;
			if self.eat(b':') {
				second = self.digits(2)?;
				micro = self.fraction()?;
			}
		} else if self.peek_digit() {
			minute = self.digits(2)?;
			if self.peek_digit() {
				second = self.digits(2)?;
				micro = self.fraction()?;
			}
		}

		Time::from_hms_micro(
			u8::try_from(hour).ok()?,
			u8::try_from(minute).ok()?,
			u8::try_from(second).ok()?,
			micro,
		)
		.ok()
	}

	/// Fraction of a second scaled to microseconds; digits past the sixth are dropped.
	fn fraction(&mut self) -> Option<u32> {
		if !(self.eat(b'.') || self.eat(b',')) {
			return Some(0);
		}
		let start = self.pos;
		while self.peek_digit() {
			self.pos += 1;
		}
		let digits = &self.bytes[start..self.pos];
		if digits.is_empty() {
			return None;
		}
		Some((0..6).fold(0, |acc, index| acc * 10 + digits.get(index).map_or(0, |byte| u32::from(byte - b'0'))))
	}

	/// `Some(None)` for `Z` or end of input, `Some(Some(_))` for a numeric offset.
	fn offset(&mut self) -> Option<Option<UtcOffset>> {
		match self.peek() {
			None => Some(None),
			Some(b'Z') => {
				self.pos += 1;
				Some(None)
			}
			Some(sign @ (b'+' | b'-')) => {
				self.pos += 1;
				let hours = i8::try_from(self.digits(2)?).ok()?;
				let minutes = if self.eat(b':') || self.peek_digit() {
					i8::try_from(self.digits(2)?).ok()?
				} else {
					0
				};
				let (hours, minutes) = if sign == b'-' { (-hours, -minutes) } else { (hours, minutes) };
				UtcOffset::from_hms(hours, minutes, 0).ok().map(Some)
			}
			Some(_) => None,
		}
	}
}

#[cfg(test)]
mod tests;
