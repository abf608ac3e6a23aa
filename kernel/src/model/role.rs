use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    // イベントを作成し、自分のイベントの登録状況を閲覧できる
    Staff,
    // イベントを閲覧し、参加登録できる
    Attendee,
}

impl Default for Role {
    fn default() -> Self {
        Self::Attendee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_maps_to_lowercase_name() {
        assert_eq!(Role::Staff.as_ref(), "staff");
        assert_eq!(Role::Attendee.as_ref(), "attendee");
        assert_eq!(Role::from_str("staff").unwrap(), Role::Staff);
        assert_eq!(Role::from_str("attendee").unwrap(), Role::Attendee);
        assert!(Role::from_str("admin").is_err());
    }
}
