use crate::LayoutError;

/// Greedy word wrap against a measured width.
///
/// `measure` returns the rendered width of a candidate line. Words are split
/// on whitespace and `\n` forces a break. A word that alone exceeds
/// `max_width` is broken between characters, each fragment keeping at least
/// one character so the loop always makes progress. Empty or whitespace-only
/// input yields no lines.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Result<Vec<String>, LayoutError>
where
    F: Fn(&str) -> Result<f32, LayoutError>,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                if measure(word)? <= max_width {
                    current.push_str(word);
                } else {
                    current = break_word(word, max_width, &measure, &mut lines)?;
                }
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if measure(&candidate)? <= max_width {
                current = candidate;
                continue;
            }

            lines.push(std::mem::take(&mut current));
            if measure(word)? <= max_width {
                current.push_str(word);
            } else {
                current = break_word(word, max_width, &measure, &mut lines)?;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    Ok(lines)
}

/// Pushes every full fragment of an oversized word onto `lines` and returns
/// the trailing fragment, which may still share its line with later words.
fn break_word<F>(
    word: &str,
    max_width: f32,
    measure: &F,
    lines: &mut Vec<String>,
) -> Result<String, LayoutError>
where
    F: Fn(&str) -> Result<f32, LayoutError>,
{
    let mut fragment = String::new();
    for ch in word.chars() {
        let mut candidate = fragment.clone();
        candidate.push(ch);
        if !fragment.is_empty() && measure(&candidate)? > max_width {
            lines.push(std::mem::replace(&mut fragment, ch.to_string()));
        } else {
            fragment = candidate;
        }
    }
    Ok(fragment)
}
