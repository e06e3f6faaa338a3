use crate::error::ApiError;

pub fn parse_positive_usize(
    raw: Option<&String>,
    fallback: usize,
    field: &str,
) -> Result<usize, ApiError> {
    match raw {
        Some(value) => {
            let parsed = value.parse::<usize>().map_err(|_| {
                ApiError::bad_request(format!("{field} must be a positive integer"))
            })?;
            if parsed == 0 {
                return Err(ApiError::bad_request(format!("{field} must be at least 1")));
            }
            Ok(parsed)
        }
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_absent() {
        assert_eq!(parse_positive_usize(None, 10, "limit").unwrap(), 10);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(parse_positive_usize(Some(&"0".to_string()), 1, "page").is_err());
        assert!(parse_positive_usize(Some(&"-1".to_string()), 1, "page").is_err());
        assert!(parse_positive_usize(Some(&"abc".to_string()), 1, "page").is_err());
    }
}
