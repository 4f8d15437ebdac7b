/// Whether `uid` must be sent as a string UID.
///
/// True when the value contains any character outside `0`-`9`. The empty
/// string and all-digit strings (including `"0"`) are numeric UIDs.
pub fn is_string_uid(uid: &str) -> bool {
    uid.chars().any(|c| !c.is_ascii_digit())
}

/// Remote users the agent should listen to.
///
/// Always the requester alone; `"0"` is not expanded to a wildcard.
pub fn remote_rtc_uids(requester_id: &str) -> Vec<String> {
    vec![requester_id.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_string_uid() {
        let cases = [
            ("12345", false),
            ("user123", true),
            ("123abc", true),
            ("", false),
            ("0", false),
            ("-1", true),
            ("１２３", true),
        ];

        for (uid, expected) in cases {
            assert_eq!(is_string_uid(uid), expected, "uid {uid:?}");
        }
    }

    #[test]
    fn test_remote_rtc_uids_single_requester() {
        assert_eq!(remote_rtc_uids("123"), vec!["123".to_string()]);
        assert_eq!(remote_rtc_uids("0"), vec!["0".to_string()]);
    }
}
