use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

pub const ARCHON_SUFFIX: &str = ".archon.json";

/// Longest stem kept from a title, in bytes. Leaves room for `_N` and the
/// suffix (or a recording timestamp) inside the usual 255-byte name limit.
pub const MAX_STEM_BYTES: usize = 200;

const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

fn sanitize_stem(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|ch| *ch != '.')
        .map(|ch| {
            if ch.is_whitespace() || ch.is_control() || ILLEGAL_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect()
}

fn cap_stem(mut stem: String) -> String {
    if stem.len() <= MAX_STEM_BYTES {
        return stem;
    }
    let mut end = MAX_STEM_BYTES;
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem.truncate(end);
    stem
}

fn date_stem(date: NaiveDate) -> String {
    format!("{:04}_{:02}_{:02}", date.year(), date.month(), date.day())
}

/// Stem used for both the session file and its recordings.
pub fn session_stem(title: &str, date: NaiveDate) -> String {
    let stem = cap_stem(sanitize_stem(title));
    if stem.trim_matches('_').is_empty() {
        date_stem(date)
    } else {
        stem
    }
}

/// Picks `{stem}.archon.json` in `dir`, or the first `{stem}_{n}.archon.json`
/// that does not exist yet.
pub fn resolve_session_path(dir: &Path, title: &str, date: NaiveDate) -> PathBuf {
    let stem = session_stem(title, date);
    let first = dir.join(format!("{stem}{ARCHON_SUFFIX}"));
    if !first.exists() {
        return first;
    }

    let mut n = 1u64;
    loop {
        let candidate = dir.join(format!("{stem}_{n}{ARCHON_SUFFIX}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 4, 2).expect("date")
    }

    #[test]
    fn title_is_lowercased_and_cleaned() {
        assert_eq!(session_stem("Wings. For Ginnungagap", date()), "wings_for_ginnungagap");
        assert_eq!(session_stem("Act 1: The Pit?", date()), "act_1__the_pit_");
        assert_eq!(session_stem("a/b\\c", date()), "a_b_c");
    }

    #[test]
    fn empty_or_unusable_title_falls_back_to_date() {
        assert_eq!(session_stem("", date()), "2015_04_02");
        assert_eq!(session_stem("...", date()), "2015_04_02");
        assert_eq!(session_stem("  ", date()), "2015_04_02");
    }

    #[test]
    fn colliding_names_get_incrementing_suffix() {
        let tmp = tempdir().expect("tempdir");
        let title = "Wings. For Ginnungagap";

        let first = resolve_session_path(tmp.path(), title, date());
        assert_eq!(first, tmp.path().join("wings_for_ginnungagap.archon.json"));
        fs::write(&first, "{}").expect("write first");

        let second = resolve_session_path(tmp.path(), title, date());
        assert_eq!(second, tmp.path().join("wings_for_ginnungagap_1.archon.json"));
        fs::write(&second, "{}").expect("write second");

        let third = resolve_session_path(tmp.path(), title, date());
        assert_eq!(third, tmp.path().join("wings_for_ginnungagap_2.archon.json"));
    }

    #[test]
    fn long_titles_are_capped_and_still_resolve() {
        let tmp = tempdir().expect("tempdir");
        let title = "a".repeat(300);

        let first = resolve_session_path(tmp.path(), &title, date());
        let expected_stem = "a".repeat(MAX_STEM_BYTES);
        assert_eq!(first, tmp.path().join(format!("{expected_stem}.archon.json")));
        fs::write(&first, "{}").expect("write capped name");

        let second = resolve_session_path(tmp.path(), &title, date());
        assert_eq!(second, tmp.path().join(format!("{expected_stem}_1.archon.json")));
        fs::write(&second, "{}").expect("write capped collision");
    }

    #[test]
    fn cap_never_splits_a_character() {
        let stem = session_stem(&"é".repeat(150), date());
        assert!(stem.len() <= MAX_STEM_BYTES);
        assert_eq!(stem, "é".repeat(MAX_STEM_BYTES / 2));
    }
}
