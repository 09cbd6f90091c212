//! Reordering fixup pass.
//!
//! Some designer commands only accept modifier flags (notably `-Extension`)
//! after the command token and its own arguments, while records declare them
//! alongside the connection fields they belong to. The pass moves every token
//! starting with a registered prefix to the end of the vector.

use tracing::debug;

/// Moves every token that starts with one of `prefixes` to the end.
///
/// The relative order of the moved tokens is preserved, and so is the
/// relative order of the tokens left in place. Without a match the vector is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use v8_args_core::relocate_to_end;
///
/// let tokens = vec![
///     "/ConfigurationRepositoryF ./repo".to_string(),
///     "-Extension ext1".to_string(),
///     "/ConfigurationRepositoryCreate".to_string(),
/// ];
/// assert_eq!(
///     relocate_to_end(tokens, &["-Extension"]),
///     ["/ConfigurationRepositoryF ./repo", "/ConfigurationRepositoryCreate", "-Extension ext1"],
/// );
/// ```
pub fn relocate_to_end(tokens: Vec<String>, prefixes: &[&str]) -> Vec<String> {
    if prefixes.is_empty() {
        return tokens;
    }

    let (moved, mut kept): (Vec<String>, Vec<String>) = tokens
        .into_iter()
        .partition(|token| prefixes.iter().any(|prefix| token.starts_with(prefix)));

    if !moved.is_empty() {
        debug!(?moved, "relocating modifier tokens to the end");
    }

    kept.extend(moved);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_match_is_unchanged() {
        let input = tokens(&["/A", "/B x", "-C"]);
        assert_eq!(relocate_to_end(input.clone(), &["-Extension"]), input);
    }

    #[test]
    fn test_no_prefixes_is_unchanged() {
        let input = tokens(&["-Extension e", "/A"]);
        assert_eq!(relocate_to_end(input.clone(), &[]), input);
    }

    #[test]
    fn test_match_moves_last_and_keeps_order() {
        let input = tokens(&["/F ./repo", "/N admin", "-Extension e", "/Create", "-NoBind"]);
        assert_eq!(
            relocate_to_end(input, &["-Extension"]),
            tokens(&["/F ./repo", "/N admin", "/Create", "-NoBind", "-Extension e"])
        );
    }

    #[test]
    fn test_multiple_matches_keep_relative_order() {
        let input = tokens(&["-Extension a", "/X", "-Extension b", "/Y"]);
        assert_eq!(
            relocate_to_end(input, &["-Extension"]),
            tokens(&["/X", "/Y", "-Extension a", "-Extension b"])
        );
    }

    #[test]
    fn test_already_last_is_stable() {
        let input = tokens(&["/X", "-Extension a"]);
        assert_eq!(relocate_to_end(input.clone(), &["-Extension"]), input);
    }
}
