use crate::app::view::GuestView;
use crate::domain::model::{Attendance, DrinkOption, DrinkSelection, RsvpSubmission, NO_DIETARY_NOTE};

/// One entry of the attendance drop-down. `value` is `None` for the
/// "choose an answer" placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceOption {
    pub value: Option<Attendance>,
    pub label: &'static str,
}

/// State of the RSVP form between page load and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpForm {
    pub attendance: Option<Attendance>,
    pub dietary: String,
    pub accommodation: String,
    pub drinks: DrinkSelection,
    pub partner_dietary: String,
    pub partner_drinks: DrinkSelection,
    submitting: bool,
    submitted: bool,
    show_form: bool,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self {
            attendance: None,
            dietary: String::new(),
            accommodation: String::new(),
            drinks: DrinkSelection::default(),
            partner_dietary: String::new(),
            partner_drinks: DrinkSelection::default(),
            submitting: false,
            submitted: false,
            show_form: true,
        }
    }
}

fn clear_alcohol(drinks: &mut DrinkSelection) {
    if drinks.no_alcohol {
        for option in DrinkOption::ALL {
            if option != DrinkOption::NoAlcohol {
                drinks.set(option, false);
            }
        }
    }
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        NO_DIETARY_NOTE.to_string()
    } else {
        value.to_string()
    }
}

impl RsvpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_form_visible(&self) -> bool {
        self.show_form
    }

    /// Guests who already answered see the thank-you state first.
    pub fn on_guest_loaded(&mut self, view: &GuestView<'_>) {
        if view.has_responded() {
            self.show_form = false;
        }
    }

    fn with_partner(&self, view: &GuestView<'_>) -> bool {
        view.is_couple() && self.attendance == Some(Attendance::AttendingWithPartner)
    }

    pub fn show_partner_section(&self, view: &GuestView<'_>) -> bool {
        self.with_partner(view)
    }

    pub fn show_guest_section_title(&self, view: &GuestView<'_>) -> bool {
        self.with_partner(view)
    }

    pub fn can_attend(&self) -> bool {
        self.attendance.is_some_and(|a| a.is_attending())
    }

    pub fn attendance_options(view: &GuestView<'_>) -> Vec<AttendanceOption> {
        let mut options = vec![
            AttendanceOption {
                value: None,
                label: "Выберите ответ",
            },
            AttendanceOption {
                value: Some(Attendance::Attending),
                label: "С радостью приду",
            },
        ];
        if view.is_couple() {
            options.push(AttendanceOption {
                value: Some(Attendance::AttendingWithPartner),
                label: "Будем оба",
            });
        }
        options.push(AttendanceOption {
            value: Some(Attendance::Declined),
            label: "К сожалению, не смогу",
        });
        options
    }

    /// Checking "no alcohol" clears every other drink.
    pub fn toggle_no_alcohol(&mut self) {
        clear_alcohol(&mut self.drinks);
    }

    pub fn toggle_partner_no_alcohol(&mut self) {
        clear_alcohol(&mut self.partner_drinks);
    }

    pub fn is_drink_disabled(&self, option: DrinkOption) -> bool {
        option != DrinkOption::NoAlcohol && self.drinks.no_alcohol
    }

    pub fn is_partner_drink_disabled(&self, option: DrinkOption) -> bool {
        option != DrinkOption::NoAlcohol && self.partner_drinks.no_alcohol
    }

    pub fn change_response(&mut self) {
        self.show_form = true;
        self.submitted = false;
    }

    /// Builds the POST body. Returns `None` until an attendance answer is chosen.
    pub fn build_submission(&self, view: &GuestView<'_>) -> Option<RsvpSubmission> {
        let attendance = self.attendance?;
        let guest = view.guest();

        Some(RsvpSubmission {
            guest_id: guest
                .map(|g| g.guest_id.clone())
                .filter(|id| !id.is_empty()),
            name: guest.map(|g| g.full_name.clone()).unwrap_or_default(),
            attendance,
            dietary: or_placeholder(&self.dietary),
            accommodation: Some(self.accommodation.clone()),
            drinks: self.drinks,
            partner_name: guest
                .map(|g| g.partner_full_name.clone())
                .unwrap_or_default(),
            partner_dietary: or_placeholder(&self.partner_dietary),
            partner_drinks: self.partner_drinks,
        })
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// A failed submission leaves the form open so the guest can retry.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.submitted = true;
            self.show_form = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GuestRecord, RsvpStatus};

    fn couple() -> GuestRecord {
        GuestRecord {
            full_name: "Дмитрий Иванов".to_string(),
            ..GuestRecord::new("ivanovs", "Дмитрий").with_partner("Мария", "Мария Иванова")
        }
    }

    #[test]
    fn test_attendance_options_for_single_guest() {
        let guest = GuestRecord::new("anna", "Анна");
        let options = RsvpForm::attendance_options(&GuestView::new(Some(&guest)));
        let values: Vec<_> = options.iter().map(|o| o.value).collect();
        assert_eq!(
            values,
            vec![None, Some(Attendance::Attending), Some(Attendance::Declined)]
        );
    }

    #[test]
    fn test_attendance_options_for_couple() {
        let guest = couple();
        let options = RsvpForm::attendance_options(&GuestView::new(Some(&guest)));
        assert_eq!(options.len(), 4);
        assert_eq!(options[2].label, "Будем оба");
    }

    #[test]
    fn test_partner_section_visibility() {
        let guest = couple();
        let view = GuestView::new(Some(&guest));
        let mut form = RsvpForm::new();
        assert!(!form.show_partner_section(&view));

        form.attendance = Some(Attendance::AttendingWithPartner);
        assert!(form.show_partner_section(&view));
        assert!(form.show_guest_section_title(&view));

        let single = GuestRecord::new("anna", "Анна");
        assert!(!form.show_partner_section(&GuestView::new(Some(&single))));
    }

    #[test]
    fn test_can_attend() {
        let mut form = RsvpForm::new();
        assert!(!form.can_attend());
        form.attendance = Some(Attendance::Declined);
        assert!(!form.can_attend());
        form.attendance = Some(Attendance::Attending);
        assert!(form.can_attend());
    }

    #[test]
    fn test_no_alcohol_clears_other_drinks() {
        let mut form = RsvpForm::new();
        form.drinks.set(DrinkOption::Vodka, true);
        form.drinks.set(DrinkOption::WineRedDry, true);
        form.toggle_no_alcohol();
        assert!(form.drinks.is_selected(DrinkOption::Vodka));

        form.drinks.set(DrinkOption::NoAlcohol, true);
        form.toggle_no_alcohol();
        assert_eq!(
            form.drinks.selected().collect::<Vec<_>>(),
            vec![DrinkOption::NoAlcohol]
        );
        assert!(form.is_drink_disabled(DrinkOption::Cognac));
        assert!(!form.is_drink_disabled(DrinkOption::NoAlcohol));
        assert!(!form.is_partner_drink_disabled(DrinkOption::Cognac));
    }

    #[test]
    fn test_partner_no_alcohol_is_independent() {
        let mut form = RsvpForm::new();
        form.drinks.set(DrinkOption::Whiskey, true);
        form.partner_drinks.set(DrinkOption::Whiskey, true);
        form.partner_drinks.set(DrinkOption::NoAlcohol, true);
        form.toggle_partner_no_alcohol();
        assert!(form.drinks.is_selected(DrinkOption::Whiskey));
        assert!(!form.partner_drinks.is_selected(DrinkOption::Whiskey));
        assert!(form.is_partner_drink_disabled(DrinkOption::Whiskey));
    }

    #[test]
    fn test_build_submission() {
        let guest = couple();
        let view = GuestView::new(Some(&guest));
        let mut form = RsvpForm::new();
        assert!(form.build_submission(&view).is_none());

        form.attendance = Some(Attendance::AttendingWithPartner);
        form.partner_dietary = "вегетарианка".to_string();
        let submission = form.build_submission(&view).unwrap();

        assert_eq!(submission.guest_id.as_deref(), Some("ivanovs"));
        assert_eq!(submission.name, "Дмитрий Иванов");
        assert_eq!(submission.dietary, "—");
        assert_eq!(submission.partner_name, "Мария Иванова");
        assert_eq!(submission.partner_dietary, "вегетарианка");
        assert!(submission.includes_partner());
    }

    #[test]
    fn test_submission_without_guest() {
        let mut form = RsvpForm::new();
        form.attendance = Some(Attendance::Attending);
        let submission = form.build_submission(&GuestView::new(None)).unwrap();
        assert_eq!(submission.guest_id, None);
        assert_eq!(submission.name, "");
    }

    #[test]
    fn test_empty_guest_id_is_sent_as_null() {
        let guest = GuestRecord::new("", "Анна");
        let view = GuestView::new(Some(&guest));
        let mut form = RsvpForm::new();
        form.attendance = Some(Attendance::Declined);

        let submission = form.build_submission(&view).unwrap();
        assert_eq!(submission.guest_id, None);
        assert_eq!(submission.name, "Анна");

        let json = serde_json::to_value(&submission).unwrap();
        assert!(json["guest_id"].is_null());
    }

    #[test]
    fn test_submit_lifecycle() {
        let guest = GuestRecord {
            rsvp_status: RsvpStatus::Responded,
            ..GuestRecord::new("anna", "Анна")
        };
        let mut form = RsvpForm::new();
        form.on_guest_loaded(&GuestView::new(Some(&guest)));
        assert!(!form.is_form_visible());

        form.change_response();
        assert!(form.is_form_visible());

        form.begin_submit();
        assert!(form.is_submitting());
        form.finish_submit(false);
        assert!(!form.is_submitting());
        assert!(form.is_form_visible());

        form.begin_submit();
        form.finish_submit(true);
        assert!(form.is_submitted());
        assert!(!form.is_form_visible());
    }
}
