/// Greedy word wrap.
///
/// Words are separated by runs of whitespace. A word is appended to the current line while the
/// measured line stays within `max_width`; otherwise the line is closed and the word starts the
/// next one. A word wider than `max_width` sits alone on its own line, it is never split.
/// The result always holds at least one line.
pub fn wrap_text<M>(text: &str, measure: M, max_width: f32) -> Vec<String>
where
    M: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
