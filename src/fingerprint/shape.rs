//! Run-length encoding of token sequences into shape vectors.
//!
//! A maximal run of `n >= 2` identical entries becomes `"<entry>*<n>"`; single
//! entries are kept bare.

/// Collapse consecutive identical entries into `entry*n` tokens
pub fn compress<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut compressed = Vec::new();
    let mut iter = entries.iter().map(AsRef::as_ref);

    let Some(mut current) = iter.next() else {
        return compressed;
    };
    let mut run = 1usize;

    for entry in iter {
        if entry == current {
            run += 1;
        } else {
            compressed.push(encode_run(current, run));
            current = entry;
            run = 1;
        }
    }
    compressed.push(encode_run(current, run));
    compressed
}

/// Expand a shape vector back into the raw per-entry sequence
pub fn expand<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut entries = Vec::new();
    for token in tokens {
        let (entry, count) = decode_token(token.as_ref());
        entries.extend(std::iter::repeat_n(entry.to_string(), count));
    }
    entries
}

/// Split a token into its entry and run length (1 for bare tokens)
pub fn decode_token(token: &str) -> (&str, usize) {
    match token.rsplit_once('*') {
        Some((entry, count)) => match count.parse::<usize>() {
            Ok(n) if n >= 2 => (entry, n),
            _ => (token, 1),
        },
        None => (token, 1),
    }
}

fn encode_run(entry: &str, run: usize) -> String {
    if run > 1 {
        format!("{}*{}", entry, run)
    } else {
        entry.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compress_runs() {
        let tags = ["html", "body", "ul", "li", "li", "li", "p", "li"];
        assert_eq!(compress(&tags), vec!["html", "body", "ul", "li*3", "p", "li"]);
    }

    #[test]
    fn test_compress_empty() {
        let empty: [&str; 0] = [];
        assert!(compress(&empty).is_empty());
    }

    #[test]
    fn test_compress_layout_entries() {
        let entries = ["div:block", "span:inline", "span:inline", "span:none"];
        assert_eq!(compress(&entries), vec!["div:block", "span:inline*2", "span:none"]);
    }

    #[test]
    fn test_decode_token() {
        assert_eq!(decode_token("li*3"), ("li", 3));
        assert_eq!(decode_token("div"), ("div", 1));
        assert_eq!(decode_token("div:block*12"), ("div:block", 12));
    }

    proptest! {
        #[test]
        fn prop_compress_is_idempotent(tags in prop::collection::vec(prop::sample::select(vec!["div", "span", "p", "li"]), 0..64)) {
            let shape = compress(&tags);
            prop_assert_eq!(expand(&shape), tags.iter().map(|t| t.to_string()).collect::<Vec<_>>());
            prop_assert_eq!(compress(&expand(&shape)), shape.clone());
        }

        #[test]
        fn prop_no_adjacent_tokens_share_a_tag(tags in prop::collection::vec(prop::sample::select(vec!["a", "b"]), 0..64)) {
            let shape = compress(&tags);
            for pair in shape.windows(2) {
                prop_assert_ne!(decode_token(&pair[0]).0, decode_token(&pair[1]).0);
            }
        }
    }
}
