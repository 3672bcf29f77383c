//! Shell completion for `access`

use super::command::Subcommand;
use super::error::AccessError;

const PERMISSIONS: [&str; 2] = ["read-only", "read-write"];

/// Candidate next words for a partial command line
///
/// `remain` is the full word list including the two leading command words
/// (e.g. `["raya", "access", "grant"]`).
pub fn complete<S: AsRef<str>>(remain: &[S]) -> Result<&'static [&'static str], AccessError> {
    let Some(word) = remain.get(2).map(|w| w.as_ref()) else {
        return Ok(&Subcommand::NAMES);
    };

    let subcommand: Subcommand = word
        .parse()
        .map_err(|_| AccessError::CompletionUnrecognized(word.to_string()))?;

    match subcommand {
        Subcommand::Grant if remain.len() == 3 => Ok(&PERMISSIONS),
        _ => Ok(&[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_subcommands() {
        let words = complete(&["raya", "access"]).unwrap();
        assert_eq!(
            words,
            [
                "public",
                "restricted",
                "grant",
                "revoke",
                "ls-packages",
                "ls-collaborators",
                "edit",
                "2fa-required",
                "2fa-not-required",
            ]
        );
    }

    #[test]
    fn test_complete_grant_permissions() {
        assert_eq!(
            complete(&["raya", "access", "grant"]).unwrap(),
            ["read-only", "read-write"]
        );
        assert!(complete(&["raya", "access", "grant", "read-only"]).unwrap().is_empty());
    }

    #[test]
    fn test_complete_other_subcommands_empty() {
        for name in Subcommand::NAMES.into_iter().filter(|n| *n != "grant") {
            assert!(
                complete(&["raya", "access", name]).unwrap().is_empty(),
                "{name} should have no completions"
            );
        }
    }

    #[test]
    fn test_complete_unrecognized() {
        let err = complete(&["raya", "access", "foobar"]).unwrap_err();
        assert!(matches!(err, AccessError::CompletionUnrecognized(_)));
        assert!(err.to_string().contains("foobar not recognized"));
    }
}
