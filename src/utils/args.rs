//! Helpers for caller-supplied extractor arguments
//!
//! Extra arguments arrive as one line of shell-style text. They are split into
//! tokens, filtered against a denylist (and optionally against the flags the
//! tool reports in `--help`), and the final command line is rendered back into
//! a quoted string for logging.

use crate::utils::error::{ResolverError, ResolverResult};
use std::collections::HashSet;

/// Split shell-style text into tokens
pub fn tokenize(text: &str) -> ResolverResult<Vec<String>> {
    shlex::split(text).ok_or_else(|| {
        ResolverError::InvalidArguments(format!("unbalanced quotes or escape in {:?}", text))
    })
}

/// Name of a flag token, without an inline value
///
/// `--name=value` yields `--name`; a short flag with its value attached
/// (`-fbest`) yields `-f`.
fn flag_name(token: &str) -> &str {
    if token.starts_with("--") {
        return token.split_once('=').map_or(token, |(name, _)| name);
    }
    match token.char_indices().nth(2) {
        Some((end, _)) if token.starts_with('-') => &token[..end],
        _ => token,
    }
}

fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Remove denylisted (or unsupported) flags from `tokens`
///
/// A removed flag also takes its value with it when the next token is not a
/// flag itself. When `supported` is given, any flag missing from it is removed
/// as well. Positional tokens are kept as-is.
pub fn sanitize_args<S: AsRef<str>>(
    tokens: &[String],
    denylist: &[S],
    supported: Option<&HashSet<String>>,
) -> Vec<String> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if !is_flag(token) {
            kept.push(token.clone());
            continue;
        }

        let name = flag_name(token);
        let denied = denylist.iter().any(|d| d.as_ref() == name);
        let unsupported = supported.is_some_and(|set| !set.contains(name));

        if denied || unsupported {
            let inline_value = name.len() != token.len();
            if !inline_value && iter.peek().is_some_and(|next| !is_flag(next)) {
                iter.next();
            }
            continue;
        }

        kept.push(token.clone());
    }

    kept
}

/// Render a program and its arguments as a shell-quoted command line
pub fn render_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(|a| a.as_ref()));
    match shlex::try_join(words.clone()) {
        Ok(joined) => joined,
        Err(_) => words.collect::<Vec<_>>().join(" "),
    }
}

/// Collect the flag names listed in a tool's `--help` output
///
/// Option lines look like `    -f, --format FORMAT    Video format code`;
/// every leading token starting with `-` is taken as a flag.
pub fn parse_help_flags(help: &str) -> HashSet<String> {
    let mut flags = HashSet::new();

    for line in help.lines() {
        let line = line.trim_start();
        if !line.starts_with('-') {
            continue;
        }
        for word in line.split_whitespace() {
            let word = word.trim_end_matches(',');
            if !is_flag(word) {
                break;
            }
            flags.insert(flag_name(word).to_string());
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DENYLIST: [&str; 4] = ["-f", "-g", "--no-warnings", "--extractor-args"];

    fn tokens(text: &str) -> Vec<String> {
        tokenize(text).unwrap()
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokens(r#"--user-agent "Mozilla 5.0" --proxy 'socks5://h:1'"#),
            vec!["--user-agent", "Mozilla 5.0", "--proxy", "socks5://h:1"]
        );
    }

    #[test]
    fn test_tokenize_unbalanced() {
        let err = tokenize("--user-agent \"oops").unwrap_err();
        assert!(matches!(err, ResolverError::InvalidArguments(_)));
    }

    #[test]
    fn test_sanitize_strips_denylisted_with_values() {
        let result = sanitize_args(&tokens("-f bestaudio -g --custom-flag value"), &DENYLIST, None);
        assert_eq!(result, vec!["--custom-flag", "value"]);
    }

    #[test]
    fn test_sanitize_flag_followed_by_flag() {
        let result = sanitize_args(&tokens("--no-warnings --geo-bypass"), &DENYLIST, None);
        assert_eq!(result, vec!["--geo-bypass"]);
    }

    #[test]
    fn test_sanitize_inline_value() {
        let result = sanitize_args(
            &tokens("--extractor-args=youtube:player_client=web keep"),
            &DENYLIST,
            None,
        );
        assert_eq!(result, vec!["keep"]);
    }

    #[test]
    fn test_sanitize_attached_short_values() {
        let result = sanitize_args(
            &tokens("-fbestaudio -gx --format worst --proxy http://p:8080"),
            &DENYLIST,
            None,
        );
        assert_eq!(result, vec!["--format", "worst", "--proxy", "http://p:8080"]);
    }

    #[test]
    fn test_sanitize_attached_short_value_keeps_next_token() {
        let result = sanitize_args(&tokens("-fbest keep"), &DENYLIST, None);
        assert_eq!(result, vec!["keep"]);
    }

    #[test]
    fn test_flag_name() {
        assert_eq!(flag_name("-f"), "-f");
        assert_eq!(flag_name("-fbestaudio"), "-f");
        assert_eq!(flag_name("--format=worst"), "--format");
        assert_eq!(flag_name("--no-warnings"), "--no-warnings");
        assert_eq!(flag_name("-é"), "-é");
    }

    #[test]
    fn test_sanitize_trailing_denied_flag() {
        let result = sanitize_args(&tokens("--cookies c.txt -f"), &DENYLIST, None);
        assert_eq!(result, vec!["--cookies", "c.txt"]);
    }

    #[test]
    fn test_sanitize_with_supported_set() {
        let supported: HashSet<String> = ["--cookies", "--proxy"].iter().map(|s| s.to_string()).collect();
        let result = sanitize_args(
            &tokens("--cookies c.txt --bogus x --proxy http://p:8080"),
            &DENYLIST,
            Some(&supported),
        );
        assert_eq!(result, vec!["--cookies", "c.txt", "--proxy", "http://p:8080"]);
    }

    #[test]
    fn test_render_command_quotes() {
        let rendered = render_command("yt-dlp", &["-f", "bestvideo[vcodec~='(vp09|avc1)']+m4a/best"]);
        assert!(rendered.starts_with("yt-dlp -f "));
        assert_eq!(shlex::split(&rendered).unwrap()[2], "bestvideo[vcodec~='(vp09|avc1)']+m4a/best");
    }

    #[test]
    fn test_parse_help_flags() {
        let help = "Usage: yt-dlp [OPTIONS] URL [URL...]\n\
                    \n\
                    General Options:\n    \
                        -h, --help                      Print this help text and exit\n    \
                        -f, --format FORMAT             Video format code\n    \
                        --no-warnings                   Ignore warnings\n    \
                        --extractor-args IE_KEY:ARGS    Pass ARGS arguments\n";
        let flags = parse_help_flags(help);
        for flag in ["-h", "--help", "-f", "--format", "--no-warnings", "--extractor-args"] {
            assert!(flags.contains(flag), "missing {}", flag);
        }
        assert!(!flags.contains("FORMAT"));
        assert_eq!(flags.len(), 6);
    }

    proptest! {
        #[test]
        fn denylisted_flags_never_survive(
            words in proptest::collection::vec(
                prop_oneof![
                    Just("-f".to_string()),
                    Just("-g".to_string()),
                    Just("--no-warnings".to_string()),
                    Just("--extractor-args".to_string()),
                    Just("--proxy".to_string()),
                    "-[fg][a-z]{1,8}",
                    "--extractor-args=[a-z:=]{1,10}",
                    "[a-z0-9:/.]{1,12}",
                ],
                0..16,
            )
        ) {
            let result = sanitize_args(&words, &DENYLIST, None);
            prop_assert!(result.iter().all(|t| !DENYLIST.contains(&flag_name(t))));
            prop_assert!(result.len() <= words.len());
        }
    }
}
