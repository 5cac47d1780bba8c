//! English list formatting for culprit announcements.

/// Join display names into a spoken-style English list.
///
/// Two names read `"A and B"`; three or more read `"A B C and D"` with the
/// names space-joined and no commas. Messages have read this way since the
/// feature shipped, so the missing commas stay. Input order is preserved.
#[must_use]
pub fn format_name_list<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut remaining = names.len() - 1;
    for name in names {
        if remaining == 0 && !out.is_empty() {
            out.push_str(" and ");
            out.push_str(name.as_ref());
        } else {
            out.push(' ');
            out.push_str(name.as_ref());
        }
        remaining = remaining.saturating_sub(1);
    }
    // The loop always prefixes a separator, so drop the leading space.
    out[1..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_formats_to_empty_string() {
        assert_eq!(format_name_list::<&str>(&[]), "");
    }

    #[test]
    fn single_name_stands_alone() {
        assert_eq!(format_name_list(&["James"]), "James");
    }

    #[test]
    fn two_names_joined_with_and() {
        assert_eq!(format_name_list(&["William", "James"]), "William and James");
    }

    #[test]
    fn three_names_space_joined_with_final_and() {
        assert_eq!(
            format_name_list(&["William", "James", "Luke"]),
            "William James and Luke"
        );
    }

    #[test]
    fn input_order_is_preserved() {
        assert_eq!(
            format_name_list(&["Zoe", "Adam", "Mia"]),
            "Zoe Adam and Mia"
        );
    }
}
