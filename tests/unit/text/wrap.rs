use super::*;

fn mono(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

#[test]
fn empty_text_yields_one_empty_line() {
    assert_eq!(wrap_text("", mono, 100.0), vec![String::new()]);
    assert_eq!(wrap_text("   ", mono, 100.0), vec![String::new()]);
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap_text("HELLO", mono, 100.0), vec!["HELLO"]);
}

#[test]
fn breaks_before_overflowing_word() {
    let lines = wrap_text("aaa bbb ccc", mono, 70.0);
    assert_eq!(lines, vec!["aaa bbb", "ccc"]);
}

#[test]
fn overlong_word_is_kept_whole_on_its_own_line() {
    let lines = wrap_text("a supercalifragilistic b", mono, 50.0);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn collapses_whitespace_runs() {
    let lines = wrap_text("a   b\tc", mono, 1000.0);
    assert_eq!(lines, vec!["a b c"]);
}

#[test]
fn rewrapping_joined_lines_is_stable() {
    let samples = [
        "A VERY LONG SENTENCE THAT MUST WRAP ACROSS MULTIPLE LINES",
        "one  two three   four five six seven eight nine ten",
        "x",
        "",
        "antidisestablishmentarianism is long",
    ];
    for width in [20.0, 55.0, 90.0, 200.0, 1000.0] {
        for text in samples {
            let first = wrap_text(text, mono, width);
            let second = wrap_text(&first.join(" "), mono, width);
            assert_eq!(first, second, "text={text:?} width={width}");
        }
    }
}
