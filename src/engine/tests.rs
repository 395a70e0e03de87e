use crate::{
    Context, DateOrder, ErrorKind, HdateParser, Options, ParseError, Precision, ResolvedTriple, Role, Ymd, calendar,
    parse,
};

use Precision::{Circa as C, Day as D, Month as M, Ongoing as O, Year as Y};

/// `(year, month, day)` with negative years for BCE.
type Expected = (i32, u32, u32);

struct Case {
    input: &'static str,
    early: (Expected, Precision),
    mid: (Expected, Precision),
    late: (Expected, Precision),
}

const fn case(
    input: &'static str,
    early: (Expected, Precision),
    mid: (Expected, Precision),
    late: (Expected, Precision),
) -> Case {
    Case { input, early, mid, late }
}

fn parser(order: DateOrder) -> HdateParser {
    HdateParser::new(Options { date_order: order, ..Options::default() })
}

fn check(order: DateOrder, cases: &[Case]) {
    let parser = parser(order);
    for case in cases {
        let triple = parser.parse(case.input).unwrap_or_else(|err| panic!("{:?} ({order}): {err}", case.input));
        for (role, ((year, month, day), precision)) in [(Role::Early, case.early), (Role::Mid, case.mid), (Role::Late, case.late)]
        {
            let got = triple.get(role);
            assert_eq!(got.calendar_date, Some(Ymd { year, month, day }), "{:?} ({order}) {role} date", case.input);
            assert_eq!(got.precision, precision, "{:?} ({order}) {role} precision", case.input);
        }
        assert!(triple.early.ordinal <= triple.mid.ordinal && triple.mid.ordinal <= triple.late.ordinal, "{:?}", case.input);
    }
}

// --- Order-independent shapes ---------------------------------------------------

const SHARED: &[Case] = &[
    case("1066-12-25", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
    case("1483 after 1428 before 1486", ((1428, 1, 1), Y), ((1483, 6, 15), Y), ((1486, 12, 31), Y)),
    case("1483 earliest 1428 latest 1486 ce", ((1428, 1, 1), Y), ((1483, 6, 15), Y), ((1486, 12, 31), Y)),
    case("after 1428 before 1486", ((1428, 1, 1), Y), ((1457, 7, 1), C), ((1486, 12, 31), Y)),
    case("circa 1066-6-24", ((1061, 6, 24), C), ((1066, 6, 24), C), ((1071, 6, 24), C)),
    case("c. 1066-6-24", ((1061, 6, 24), C), ((1066, 6, 24), C), ((1071, 6, 24), C)),
    case("c. 1578 ", ((1573, 6, 15), C), ((1578, 6, 15), C), ((1583, 6, 15), C)),
    case("1066", ((1066, 1, 1), Y), ((1066, 6, 15), Y), ((1066, 12, 31), Y)),
    case("166", ((166, 1, 1), Y), ((166, 6, 15), Y), ((166, 12, 31), Y)),
    case("1066-2", ((1066, 2, 1), M), ((1066, 2, 15), M), ((1066, 2, 28), M)),
    case("ongoing", ((2013, 2, 12), O), ((2013, 2, 12), O), ((2018, 2, 12), O)),
];

#[test]
fn shared_shapes_resolve_in_every_order() {
    for order in [DateOrder::Default, DateOrder::Dmy, DateOrder::Mdy] {
        check(order, SHARED);
    }
}

// --- Default order ---------------------------------------------------------------

#[test]
fn default_order() {
    check(DateOrder::Default, &[
        case("25 Dec 1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("25th Dec 1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("25 Dec, 1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("june 1066", ((1066, 6, 1), M), ((1066, 6, 15), M), ((1066, 6, 30), M)),
        case("24 june 1066", ((1066, 6, 24), D), ((1066, 6, 24), D), ((1066, 6, 24), D)),
        case("circa2y 25 Dec 1066", ((1064, 12, 25), C), ((1066, 12, 25), C), ((1068, 12, 24), C)),
        case("about 14 October 1066", ((1061, 10, 14), C), ((1066, 10, 14), C), ((1071, 10, 14), C)),
        case("before Feb 1700", ((1690, 2, 28), C), ((1695, 2, 28), C), ((1700, 2, 28), M)),
    ]);
}

// --- Numeric prefixes ------------------------------------------------------------

#[test]
fn day_month_year_order() {
    check(DateOrder::Dmy, &[
        case("25/12/1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("25 Dec, 1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("circa2y 25/12/1066", ((1064, 12, 25), C), ((1066, 12, 25), C), ((1068, 12, 24), C)),
        case("6/1066", ((1066, 6, 1), M), ((1066, 6, 15), M), ((1066, 6, 30), M)),
    ]);
}

#[test]
fn month_day_year_order() {
    check(DateOrder::Mdy, &[
        case("12/25/1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("Dec 25, 1066", ((1066, 12, 25), D), ((1066, 12, 25), D), ((1066, 12, 25), D)),
        case("circa2y 12/25/1066", ((1064, 12, 25), C), ((1066, 12, 25), C), ((1068, 12, 24), C)),
    ]);
}

// --- Before the common era -------------------------------------------------------

#[test]
fn bce_ordinals() {
    let cases: &[(&str, (i64, i64, i64), Precision)] = &[
        ("487 bc", (-177876, -177711, -177512), Y),
        ("12 July 100 BC", (-36332, -36332, -36332), D),
        ("12 July 100BCe", (-36332, -36332, -36332), D),
        ("c. 287BC", (-106487, -104661, -102835), C),
    ];

    for (input, ordinals, precision) in cases {
        let triple = parse(input).unwrap();
        assert_eq!(triple.ordinals(), *ordinals, "{input}");
        assert_eq!(triple.mid.precision, *precision, "{input}");
    }

    let triple = parse("487 bc").unwrap();
    assert_eq!(triple.early.calendar_date, Some(Ymd { year: -487, month: 1, day: 1 }));
    assert_eq!(triple.late.calendar_date, Some(Ymd { year: -487, month: 12, day: 31 }));
}

#[test]
fn ranges_across_the_era_boundary() {
    let triple = parse("between 500 and 400BC").unwrap();
    assert_eq!(triple.early.calendar_date, Some(Ymd { year: -500, month: 1, day: 1 }));
    assert_eq!(triple.late.calendar_date, Some(Ymd { year: -400, month: 12, day: 31 }));
    assert_eq!(triple.mid.precision, C);

    let triple = parse("1 bc latest 1 ad").unwrap();
    assert_eq!(triple.mid.calendar_date, Some(Ymd { year: -1, month: 6, day: 15 }));
    assert_eq!(triple.late.calendar_date, Some(Ymd { year: 1, month: 12, day: 31 }));
    assert_eq!(triple.early.calendar_date, Some(Ymd { year: -1, month: 1, day: 1 }));
}

#[test]
fn range_with_mixed_era() {
    let triple = parse("Between 27BC and 14AD").unwrap();
    assert_eq!(triple.early.calendar_date, Some(Ymd { year: -27, month: 1, day: 1 }));
    assert_eq!(triple.early.precision, Y);
    assert_eq!(triple.mid.precision, C);
    assert_eq!(triple.late.calendar_date, Some(Ymd { year: 14, month: 12, day: 31 }));
    assert_eq!(triple.late.precision, Y);
    assert!(triple.early.ordinal < triple.mid.ordinal && triple.mid.ordinal < triple.late.ordinal);
}

#[test]
fn legacy_bce_representation_keeps_ordinals() {
    let options = Options { supports_native_bce_date: false, ..Options::default() };
    let legacy = HdateParser::new(options).parse("487 bc").unwrap();
    let native = parse("487 bc").unwrap();

    assert_eq!(legacy.ordinals(), native.ordinals());
    assert!([legacy.early, legacy.mid, legacy.late].iter().all(|date| date.calendar_date.is_none()));
}

// --- Errors ----------------------------------------------------------------------

#[test]
fn rejected_inputs() {
    let cases: &[(DateOrder, &str, ErrorKind)] = &[
        (DateOrder::Default, "25/12/1066", ErrorKind::Format),
        (DateOrder::Dmy, "12/25/1066", ErrorKind::Format),
        (DateOrder::Mdy, "25/12/1066", ErrorKind::Format),
        (DateOrder::Default, "", ErrorKind::Format),
        (DateOrder::Default, "the battle of hastings", ErrorKind::Format),
        (DateOrder::Default, "1066 1067", ErrorKind::Format),
        (DateOrder::Default, "Dec 1066-12", ErrorKind::Validation),
        (DateOrder::Default, "25 Dec 1066-12-25", ErrorKind::Validation),
        (DateOrder::Default, "after 400 bc", ErrorKind::Validation),
        (DateOrder::Default, "30 Feb 1700", ErrorKind::Validation),
        (DateOrder::Default, "0 bc", ErrorKind::Validation),
        (DateOrder::Default, "1066 earliest 1070", ErrorKind::Validation),
        (DateOrder::Default, "after 1070 before 1060", ErrorKind::Validation),
        (DateOrder::Default, "c. 1066 after 1070", ErrorKind::Validation),
        (DateOrder::Dmy, "12-25", ErrorKind::Validation),
        (DateOrder::Mdy, "12-25", ErrorKind::Validation),
    ];

    for (order, input, kind) in cases {
        let err = parser(*order).parse(input).expect_err(input);
        assert_eq!(err.kind(), *kind, "{input:?} ({order}): {err}");
    }
}

#[test]
fn errors_name_the_offending_group() {
    assert_eq!(parse("after 1066-6 before Mar 1070-3"), Err(ParseError::ConflictingMonth { role: Role::Late }));
    assert_eq!(parse("31 Jun 1066"), Err(ParseError::DayOutOfRange { role: Role::Mid, day: 31, max: 30 }));
    assert!(matches!(parse("1066 earliest 1070"), Err(ParseError::BoundsOutOfOrder { .. })));
}

#[test]
fn year_month_suffix_ignores_date_order() {
    for input in ["10-6", "10-6-24", "1066-12"] {
        let expected = parser(DateOrder::Default).parse(input).unwrap();
        for order in [DateOrder::Dmy, DateOrder::Mdy] {
            assert_eq!(parser(order).parse(input), Ok(expected), "{input} ({order})");
        }
    }
}

// --- Properties ------------------------------------------------------------------

/// Every day in ±2500 years survives ordinal → date → text → parse.
#[test]
fn ordinal_text_round_trip() {
    let parser = HdateParser::default();
    let mut ordinal = -365 * 2500;
    while ordinal <= 365 * 2500 {
        let ymd = calendar::from_ordinal(ordinal).unwrap();
        let text = ymd.to_string();
        let triple = parser.parse(&text).unwrap_or_else(|err| panic!("{text}: {err}"));
        assert_eq!(triple.mid.ordinal, ordinal, "{text}");
        ordinal += 97;
    }
}

#[test]
fn reparsing_formatted_output_is_idempotent() {
    for input in ["25 Dec 1066", "12 July 100 BC", "1066-6-24", "29 Feb 45 BC", "1 Jan 1 AD", "31 Dec 1 BC"] {
        let first = parse(input).unwrap();
        let text = first.mid.calendar_date.unwrap().to_string();
        let second: ResolvedTriple = parse(&text).unwrap();
        assert_eq!(first, second, "{input} → {text}");
    }
}

#[test]
fn ongoing_uses_the_supplied_day_once() {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let triple = HdateParser::default().parse_at("Ongoing", &Context::at(today)).unwrap();
    assert_eq!(triple.early, triple.mid);
    assert_eq!(triple.mid.naive_date(), Some(today));
    assert_eq!(triple.late.ordinal - triple.mid.ordinal, 1826);
}
