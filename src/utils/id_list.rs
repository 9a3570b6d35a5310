//! Comma separated id lists addressed in a single path segment, e.g.
//! `/api/authorcollections/(id1,id2)`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdListError {
    #[error("no ids were supplied")]
    Empty,
    #[error("'{0}' is not a valid id")]
    InvalidId(String),
}

/// Parse `(id1,id2,...)`. Parentheses are optional, entries are trimmed and
/// empty entries skipped. Order and duplicates are preserved.
pub fn parse_id_list(segment: &str) -> Result<Vec<Uuid>, IdListError> {
    let segment = segment.trim();
    let inner = segment
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(segment);

    let ids = inner
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| Uuid::parse_str(token).map_err(|_| IdListError::InvalidId(token.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(IdListError::Empty);
    }
    Ok(ids)
}

/// Join ids with commas, in iteration order.
pub fn join_ids<I>(ids: I) -> String
where
    I: IntoIterator<Item = Uuid>,
{
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "d28888e9-2ba9-473a-a40f-e38cb54f9b35";
    const SECOND: &str = "da2fd609-d754-4feb-8acd-c4f9ff13ba96";

    #[test]
    fn parses_parenthesised_list() {
        let ids = parse_id_list(&format!("({FIRST},{SECOND})")).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].to_string(), FIRST);
        assert_eq!(ids[1].to_string(), SECOND);
    }

    #[test]
    fn tolerates_whitespace_and_empty_entries() {
        let ids = parse_id_list(&format!("( {FIRST} ,, {SECOND} ,)")).unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn parentheses_are_optional() {
        assert_eq!(parse_id_list(FIRST).unwrap().len(), 1);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(parse_id_list("()"), Err(IdListError::Empty));
        assert_eq!(parse_id_list(" , "), Err(IdListError::Empty));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert_eq!(
            parse_id_list(&format!("({FIRST},nope)")),
            Err(IdListError::InvalidId("nope".to_string()))
        );
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_id_list(&format!("({FIRST},{FIRST})")).unwrap().len(), 2);
    }

    #[test]
    fn join_keeps_order() {
        let ids = parse_id_list(&format!("({SECOND},{FIRST})")).unwrap();
        assert_eq!(join_ids(ids), format!("{SECOND},{FIRST}"));
    }
}
