mod parse_iso {

	use time::macros::{date, datetime};

	use crate::mapping::temporal::{Temporal, parse};

	fn offset_minutes(input: &str) -> i16 {
		match parse(input) {
			Some(Temporal::OffsetDateTime(value)) => value.offset().whole_minutes(),
			other => panic!("expected offset datetime for {input}, got {other:?}"),
		}
	}

	#[test]
	fn date_forms() {
		assert_eq!(parse("2018-08-13"), Some(Temporal::Date(date!(2018 - 08 - 13))));
		assert_eq!(parse("20180813"), Some(Temporal::Date(date!(2018 - 08 - 13))));
	}

	#[test]
	fn naive_datetime_forms() {
		let expected = Some(Temporal::DateTime(datetime!(2018-08-13 16:31:12)));
		for input in ["2018-08-13T16:31:12Z", "2018-08-13T16:31:12", "20180813T163112", "20180813T163112Z"] {
			assert_eq!(parse(input), expected, "{input}");
		}
	}

	#[test]
	fn truncated_times_default_to_zero() {
		assert_eq!(parse("2018-08-13T16:31"), Some(Temporal::DateTime(datetime!(2018-08-13 16:31:00))));
		assert_eq!(parse("20180813T1631Z"), Some(Temporal::DateTime(datetime!(2018-08-13 16:31:00))));
		assert_eq!(parse("2018-08-13T16"), Some(Temporal::DateTime(datetime!(2018-08-13 16:00:00))));
	}

	#[test]
	fn offset_variants() {
		assert_eq!(offset_minutes("2018-08-13T16:31:12+02:00"), 120);
		assert_eq!(offset_minutes("2018-08-13T16:31:12+0200"), 120);
		assert_eq!(offset_minutes("2018-08-13T16:31:12+02"), 120);
		assert_eq!(offset_minutes("2018-08-13T16:31:12-03:30"), -210);
		assert_eq!(offset_minutes("2018-08-13T16:31:12-00:30"), -30);
	}

	#[test]
	fn offset_keeps_wall_clock_fields() {
		let Some(Temporal::OffsetDateTime(value)) = parse("2018-08-13T16:31:12+02:00") else {
			panic!("expected offset datetime");
		};
		assert_eq!(value.year(), 2018);
		assert_eq!(u8::from(value.month()), 8);
		assert_eq!(value.day(), 13);
		assert_eq!((value.hour(), value.minute(), value.second()), (16, 31, 12));
	}

	#[test]
	fn fractions_scale_to_microseconds() {
		let Some(Temporal::OffsetDateTime(value)) = parse("20180813T163112.265+02") else {
			panic!("expected offset datetime");
		};
		assert_eq!(value.microsecond(), 265_000);
		assert_eq!(value.offset().whole_minutes(), 120);

		let Some(Temporal::DateTime(value)) = parse("2018-08-13T16:31:12,1234567Z") else {
			panic!("expected naive datetime");
		};
		assert_eq!(value.microsecond(), 123_456);
	}

	#[test]
	fn rejects_non_temporal_text() {
		for input in [
			"",
			"some value",
			"12345",
			"2018-13-01",
			"2018-02-30",
			"2018-0813",
			"201808-13",
			"2018-08-13 16:31:12",
			"2018-08-13T25:00:00",
			"2018-08-13T16:31.5",
			"2018-08-13T16:31:12.",
			"2018-08-13T16:31:12+2",
			"2018-08-13T16:31:12+02:00:00",
			"2018-08-13T16:31:12Zulu",
		] {
			assert_eq!(parse(input), None, "{input:?}");
		}
	}
}

mod format_iso {

	use time::macros::{date, datetime};

	use crate::mapping::temporal::{Temporal, format_date, format_datetime, format_offset_datetime, parse};

	#[test]
	fn literal_formats() {
		assert_eq!(format_date(date!(2018 - 08 - 13)).unwrap(), "2018-08-13");
		assert_eq!(format_datetime(datetime!(2018-08-13 16:31:12)).unwrap(), "2018-08-13T16:31:12Z");
		assert_eq!(format_offset_datetime(datetime!(2018-08-13 16:31:12 +2)).unwrap(), "2018-08-13T16:31:12+0200");
		assert_eq!(format_offset_datetime(datetime!(2018-08-13 16:31:12 -3)).unwrap(), "2018-08-13T16:31:12-0300");
	}

	#[test]
	fn formatted_values_parse_back() {
		let day = date!(2024 - 02 - 29);
		assert_eq!(parse(&format_date(day).unwrap()), Some(Temporal::Date(day)));

		let stamp = datetime!(2018-08-13 16:31:12 +2);
		let Some(Temporal::OffsetDateTime(parsed)) = parse(&format_offset_datetime(stamp).unwrap()) else {
			panic!("expected offset datetime");
		};
		assert_eq!(parsed, stamp);
		assert_eq!(parsed.offset(), stamp.offset());
	}

	#[test]
	fn microseconds_are_not_encoded() {
		let stamp = datetime!(2018-08-13 16:31:12).replace_microsecond(265_000).unwrap();
		assert_eq!(format_datetime(stamp).unwrap(), "2018-08-13T16:31:12Z");
	}
}
