use quickcheck_macros::quickcheck;
use trade_dashboard_wasm::domain::capture::{
    DEFAULT_DOWNLOAD_NAME, Filename, synthesize, synthesize_at,
};
use trade_dashboard_wasm::domain::logging::{TimeProvider, init_time_provider};

const T0: u64 = 1_700_000_000_000; // 2023-11-14T22:13:20Z
const YEAR_2100: u64 = 4_102_444_800_000;

struct FixedClock(u64);

impl TimeProvider for FixedClock {
    fn current_timestamp(&self) -> u64 {
        self.0
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        timestamp.to_string()
    }
}

/// `{prefix}-YYYY-MM-DDTHH-MM-SS.png`
fn matches_pattern(name: &str, prefix: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".png"))
    else {
        return false;
    };
    stamp.len() == 19
        && stamp.char_indices().all(|(i, c)| match i {
            4 | 7 | 13 | 16 => c == '-',
            10 => c == 'T',
            _ => c.is_ascii_digit(),
        })
}

#[test]
fn formats_prefix_and_utc_seconds() {
    let name = synthesize_at("portfolio", T0 + 456);
    insta::assert_snapshot!(name.as_str(), @"portfolio-2023-11-14T22-13-20.png");
    assert!(matches_pattern(name.as_str(), "portfolio"));
}

#[test]
fn same_second_names_collide() {
    let first = synthesize_at("portfolio", T0);
    let second = synthesize_at("portfolio", T0 + 999);
    assert_eq!(first, second);
    assert!(matches_pattern(first.as_str(), "portfolio"));
}

#[test]
fn next_second_gives_a_new_name() {
    let first = synthesize_at("portfolio", T0 + 999);
    let second = synthesize_at("portfolio", T0 + 1_000);
    assert_ne!(first, second);
    assert!(matches_pattern(second.as_str(), "portfolio"));
}

#[test]
fn colons_never_survive() {
    assert_eq!(synthesize_at("a:b", T0).as_str(), "a-b-2023-11-14T22-13-20.png");
    assert_eq!(Filename::new("12:30.png").as_str(), "12-30.png");
    assert_eq!(Filename::default().as_str(), DEFAULT_DOWNLOAD_NAME);
}

#[test]
fn synthesize_reads_the_installed_clock() {
    init_time_provider(Box::new(FixedClock(T0)));
    assert_eq!(synthesize("trades").as_str(), "trades-2023-11-14T22-13-20.png");
}

#[quickcheck]
fn names_have_no_colons(prefix: String, timestamp: u64) -> bool {
    let name = synthesize_at(&prefix, timestamp % YEAR_2100);
    !name.as_str().contains(':') && name.as_str().ends_with(".png")
}

#[quickcheck]
fn names_match_the_pattern(timestamp: u64) -> bool {
    matches_pattern(synthesize_at("portfolio", timestamp % YEAR_2100).as_str(), "portfolio")
}
