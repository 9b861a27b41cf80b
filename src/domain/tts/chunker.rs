const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Split `text` into contiguous chunks of at most `max_length` characters.
///
/// Each cut lands right after the last boundary in the window, trying in order: sentence
/// punctuation followed by a space, sentence punctuation followed by a newline, a bare space.
/// The first kind found wins even if a later kind sits closer to the window end. Without any
/// boundary the window is cut hard at `max_length`. Joining the chunks yields `text` exactly.
pub fn split_text_safe(text: &str, max_length: usize) -> Vec<&str> {
    let max_length = max_length.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while let Some((end, _)) = rest.char_indices().nth(max_length) {
        let window = &rest[..end];
        let cut = find_cut(window).unwrap_or(end);
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }

    if !rest.is_empty() {
        chunks.push(rest);
    }

    chunks
}

/// Byte offset just past the preferred boundary in `window`, if any.
fn find_cut(window: &str) -> Option<usize> {
    last_sentence_break(window, ' ')
        .or_else(|| last_sentence_break(window, '\n'))
        .or_else(|| {
            window
                .char_indices()
                .rev()
                .find(|&(index, c)| c == ' ' && index > 0)
                .map(|(index, c)| index + c.len_utf8())
        })
}

fn last_sentence_break(window: &str, separator: char) -> Option<usize> {
    let chars: Vec<(usize, char)> = window.char_indices().collect();
    chars
        .windows(2)
        .rev()
        .find(|pair| pair[0].0 > 0 && SENTENCE_ENDINGS.contains(&pair[0].1) && pair[1].1 == separator)
        .map(|pair| pair[1].0 + pair[1].1.len_utf8())
}
