/// Token that could not be read as a mention or numeric id.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{token}` is not a mention or a numeric id")]
pub struct InvalidIdToken {
    pub token: String,
}

/// Parse a channel reference: `<#123>` or a bare numeric id.
pub fn parse_channel_id(raw: &str) -> Option<u64> {
    let value = raw.trim();
    let value = value
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(value);

    value.parse::<u64>().ok().filter(|&id| id != 0)
}

/// Parse a whitespace- or comma-separated list of mentions and ids.
///
/// Accepts `<@123>`, `<@!123>`, `<@&123>`, `<#123>` and bare numbers;
/// duplicates are dropped while preserving first-seen order. Any token that
/// yields no id fails the whole list.
pub fn parse_id_list(raw: &str) -> Result<Vec<u64>, InvalidIdToken> {
    let mut ids = Vec::new();

    for token in raw.split(|ch: char| ch.is_whitespace() || ch == ',') {
        if token.is_empty() {
            continue;
        }

        let digits: String = token.chars().filter(char::is_ascii_digit).collect();
        let id = digits
            .parse::<u64>()
            .ok()
            .filter(|&id| id != 0)
            .ok_or_else(|| InvalidIdToken {
                token: token.to_owned(),
            })?;

        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_accepts_mention_and_bare_forms() {
        assert_eq!(parse_channel_id("<#123456>"), Some(123_456));
        assert_eq!(parse_channel_id("123456"), Some(123_456));
        assert_eq!(parse_channel_id(" 123456 "), Some(123_456));
        assert_eq!(parse_channel_id("#general"), None);
        assert_eq!(parse_channel_id(""), None);
    }

    #[test]
    fn id_list_mixes_forms_and_dedupes() {
        let ids = parse_id_list("<@111> 222, <@&333> <@!111>").unwrap();
        assert_eq!(ids, vec![111, 222, 333]);
    }

    #[test]
    fn id_list_empty_input_is_empty() {
        assert_eq!(parse_id_list("").unwrap(), Vec::<u64>::new());
        assert_eq!(parse_id_list("  ,  ").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn id_list_rejects_junk_tokens() {
        let err = parse_id_list("111 not-an-id").unwrap_err();
        assert_eq!(err.token, "not-an-id");
    }
}
