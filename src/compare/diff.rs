use regex::Regex;
use std::sync::LazyLock;

static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>(?:</[^>]+>)?").expect("tag token pattern"));

/// Split a canonical string into opening-tag tokens, each absorbing an
/// immediately following closing tag
pub fn tokenize(canonical: &str) -> Vec<&str> {
    TAG_TOKEN.find_iter(canonical).map(|m| m.as_str()).collect()
}

/// Best-effort line diff of two canonical strings by positional token alignment.
///
/// Equal tokens are emitted as `"  tok"`; a mismatch at the same position emits
/// `"- a"` then `"+ b"` for whichever sides have a token there.
pub fn structural_diff(a: &str, b: &str) -> Vec<String> {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    let mut diff = Vec::new();

    for i in 0..tokens_a.len().max(tokens_b.len()) {
        match (tokens_a.get(i), tokens_b.get(i)) {
            (Some(left), Some(right)) if left == right => diff.push(format!("  {}", left)),
            (left, right) => {
                if let Some(left) = left {
                    diff.push(format!("- {}", left));
                }
                if let Some(right) = right {
                    diff.push(format!("+ {}", right));
                }
            }
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("<ul><li></li><li class></li></ul>");
        assert_eq!(tokens, vec!["<ul>", "<li></li>", "<li class></li>", "</ul>"]);
    }

    #[test]
    fn test_identical_inputs() {
        let diff = structural_diff("<div><p></p></div>", "<div><p></p></div>");
        assert_eq!(diff, vec!["  <div>", "  <p></p>", "  </div>"]);
    }

    #[test]
    fn test_changed_and_extra_tokens() {
        let diff = structural_diff("<div><p></p></div>", "<div><span></span></div><br></br>");
        assert_eq!(
            diff,
            vec!["  <div>", "- <p></p>", "+ <span></span>", "  </div>", "+ <br></br>"]
        );
    }
}
