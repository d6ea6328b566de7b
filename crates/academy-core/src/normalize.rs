//! Source text canonicalization.
//!
//! Submissions and reference solutions are compared in a canonical form:
//! uppercase, comment-free, single-spaced.

use std::sync::LazyLock;

use regex::Regex;

// Non-greedy across newlines; an unterminated block runs to end of text.
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?(?:\*/|\z)").expect("invalid regex"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("invalid regex"));

/// Canonicalize source text for comparison.
///
/// Uppercases, strips `/* ... */` and `// ...` comments, collapses whitespace
/// runs to a single space, and trims. Comment stripping repeats until no
/// comment remains, so input like `//*x*/* y */` cannot leave a fresh
/// comment marker behind after the first pass.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_uppercase();
    loop {
        let stripped = strip_comments(&current);
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_comments(text: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(text, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_collapses_whitespace() {
        assert_eq!(normalize("  proc   options(main);\n\tend; "), "PROC OPTIONS(MAIN); END;");
    }

    #[test]
    fn strips_block_comments_across_lines() {
        let src = "HELLO: PROC; /* first line\n second line */ PUT LIST('HI'); END;";
        assert_eq!(normalize(src), "HELLO: PROC; PUT LIST('HI'); END;");
    }

    #[test]
    fn block_comments_are_non_greedy() {
        assert_eq!(normalize("a /* x */ b /* y */ c"), "A B C");
    }

    #[test]
    fn unterminated_block_comment_strips_to_end() {
        assert_eq!(normalize("PROC; /* never closed\nEND;"), "PROC;");
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(normalize("x = 1; // note\ny = 2;"), "X = 1; Y = 2;");
    }

    #[test]
    fn comment_splice_is_fully_removed() {
        // Removing the first block comment splices a new `/*` together.
        assert_eq!(normalize("a //*x*/* tail */ b"), "A B");
        assert_eq!(normalize("a //*c*// tail\nb"), "A B");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "   ",
            "proc; /* a */ end;",
            "a /*/ b",
            "x // y /* z */\n w",
            "/* only a comment */",
            "mixed\tCase\r\nLines",
            "a/**//b",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn empty_and_comment_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("// nothing here"), "");
        assert_eq!(normalize("/* nothing */"), "");
    }
}
