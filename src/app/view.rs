//! Display strings and flags derived from the loaded guest record.

use crate::domain::declension::{decline, infer_gender, Gender, GrammaticalCase};
use crate::domain::model::{GuestGroup, GuestRecord, InvitationType, RsvpStatus};

const DEFAULT_GUEST_SECTION_TITLE: &str = "Ваши предпочтения";
const DEFAULT_PARTNER_SECTION_TITLE: &str = "Предпочтения партнёра";

/// Read-only view over the guest record. `None` means the record is still
/// loading or the link carried no known guest; every accessor has a
/// generic fallback for that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestView<'a> {
    guest: Option<&'a GuestRecord>,
}

impl<'a> GuestView<'a> {
    pub fn new(guest: Option<&'a GuestRecord>) -> Self {
        Self { guest }
    }

    pub fn guest(&self) -> Option<&'a GuestRecord> {
        self.guest
    }

    fn name(&self) -> Option<&'a str> {
        self.guest.map(|g| g.name.as_str()).filter(|n| !n.is_empty())
    }

    fn partner_name(&self) -> Option<&'a str> {
        self.guest
            .map(|g| g.partner_name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn is_couple(&self) -> bool {
        self.guest
            .is_some_and(|g| g.invitation_type == InvitationType::Couple && g.has_partner())
    }

    pub fn display_name(&self) -> String {
        match (self.name(), self.partner_name()) {
            (None, _) => String::new(),
            (Some(name), Some(partner)) if self.is_couple() => format!("{} и {}", name, partner),
            (Some(name), _) => name.to_string(),
        }
    }

    pub fn greeting(&self) -> String {
        let (Some(guest), Some(name)) = (self.guest, self.name()) else {
            return String::new();
        };
        let display_name = self.display_name();

        if guest.group != GuestGroup::Family {
            return format!("{}, привет!", display_name);
        }
        if self.is_couple() {
            return format!("Дорогие {}!", display_name);
        }

        let salutation = match infer_gender(name) {
            Gender::Feminine => "Дорогая",
            Gender::Masculine => "Дорогой",
        };
        format!("{} {}!", salutation, display_name)
    }

    pub fn invitation_type_label(&self) -> &'static str {
        match self.guest.map(|g| &g.invitation_type) {
            Some(InvitationType::Couple) => "Приглашение для двоих",
            Some(InvitationType::Single) => "Персональное приглашение",
            _ => "",
        }
    }

    pub fn guest_section_title(&self) -> String {
        match self.name() {
            Some(name) => format!("Предпочтения для {}", decline(name, GrammaticalCase::Genitive)),
            None => DEFAULT_GUEST_SECTION_TITLE.to_string(),
        }
    }

    pub fn partner_section_title(&self) -> String {
        match self.partner_name() {
            Some(partner) => format!(
                "Предпочтения для {}",
                decline(partner, GrammaticalCase::Genitive)
            ),
            None => DEFAULT_PARTNER_SECTION_TITLE.to_string(),
        }
    }

    /// "вместе с Ильёй"; empty without a partner.
    pub fn companion_phrase(&self) -> String {
        self.partner_name()
            .map(|partner| format!("вместе с {}", decline(partner, GrammaticalCase::Instrumental)))
            .unwrap_or_default()
    }

    pub fn custom_message(&self) -> Option<&'a str> {
        self.guest
            .map(|g| g.custom_message.as_str())
            .filter(|m| !m.is_empty())
    }

    pub fn show_accommodation(&self) -> bool {
        self.guest.map_or(true, |g| g.show_accommodation)
    }

    pub fn show_alcohol(&self) -> bool {
        self.guest.map_or(true, |g| g.show_alcohol)
    }

    pub fn has_responded(&self) -> bool {
        self.guest
            .is_some_and(|g| g.rsvp_status == RsvpStatus::Responded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(name: &str) -> GuestRecord {
        GuestRecord {
            group: GuestGroup::Family,
            ..GuestRecord::new("g", name)
        }
    }

    #[test]
    fn test_no_guest_falls_back() {
        let view = GuestView::new(None);
        assert_eq!(view.display_name(), "");
        assert_eq!(view.greeting(), "");
        assert_eq!(view.invitation_type_label(), "");
        assert_eq!(view.guest_section_title(), "Ваши предпочтения");
        assert_eq!(view.partner_section_title(), "Предпочтения партнёра");
        assert_eq!(view.companion_phrase(), "");
        assert!(view.show_accommodation());
        assert!(view.show_alcohol());
        assert!(!view.has_responded());
        assert!(!view.is_couple());
    }

    #[test]
    fn test_friends_greeting() {
        let guest = GuestRecord::new("g", "Игорь");
        assert_eq!(GuestView::new(Some(&guest)).greeting(), "Игорь, привет!");
    }

    #[test]
    fn test_family_greeting_uses_gender() {
        let anna = family("Анна");
        let igor = family("Игорь");
        let lyubov = family("Любовь");
        assert_eq!(GuestView::new(Some(&anna)).greeting(), "Дорогая Анна!");
        assert_eq!(GuestView::new(Some(&igor)).greeting(), "Дорогой Игорь!");
        assert_eq!(GuestView::new(Some(&lyubov)).greeting(), "Дорогая Любовь!");
    }

    #[test]
    fn test_family_couple_greeting() {
        let guest = family("Дмитрий").with_partner("Мария", "Мария Петрова");
        let view = GuestView::new(Some(&guest));
        assert!(view.is_couple());
        assert_eq!(view.display_name(), "Дмитрий и Мария");
        assert_eq!(view.greeting(), "Дорогие Дмитрий и Мария!");
        assert_eq!(view.invitation_type_label(), "Приглашение для двоих");
    }

    #[test]
    fn test_couple_without_partner_name_is_single() {
        let guest = GuestRecord {
            invitation_type: InvitationType::Couple,
            ..family("Анна")
        };
        let view = GuestView::new(Some(&guest));
        assert!(!view.is_couple());
        assert_eq!(view.display_name(), "Анна");
        assert_eq!(view.greeting(), "Дорогая Анна!");
    }

    #[test]
    fn test_section_titles_are_genitive() {
        let guest = GuestRecord::new("g", "Дмитрий").with_partner("Илья", "Илья Сидоров");
        let view = GuestView::new(Some(&guest));
        assert_eq!(view.guest_section_title(), "Предпочтения для Дмитрия");
        assert_eq!(view.partner_section_title(), "Предпочтения для Ильи");
        assert_eq!(view.companion_phrase(), "вместе с Ильёй");
    }

    #[test]
    fn test_unknown_invitation_type_has_no_label() {
        let guest = GuestRecord {
            invitation_type: InvitationType::Other("vip".to_string()),
            ..GuestRecord::new("g", "Анна")
        };
        assert_eq!(GuestView::new(Some(&guest)).invitation_type_label(), "");
    }

    #[test]
    fn test_flags() {
        let guest = GuestRecord {
            show_alcohol: false,
            rsvp_status: RsvpStatus::Responded,
            ..GuestRecord::new("g", "Анна")
        };
        let view = GuestView::new(Some(&guest));
        assert!(!view.show_alcohol());
        assert!(view.show_accommodation());
        assert!(view.has_responded());
    }
}
