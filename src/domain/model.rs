use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::RsvpError;

/// Guests sheet column names, in the order used when a sheet is created.
pub const GUEST_HEADERS: [&str; 11] = [
    "guest_id",
    "name",
    "full_name",
    "invitation_type",
    "partner_name",
    "partner_full_name",
    "group",
    "custom_message",
    "show_accommodation",
    "show_alcohol",
    "rsvp_status",
];

/// Leading Responses sheet columns; one column per [`DrinkOption`] follows.
pub const RESPONSE_BASE_HEADERS: [&str; 6] = [
    "Timestamp",
    "Guest ID",
    "Name",
    "Attendance",
    "Dietary",
    "Accommodation",
];

pub const GUEST_ID_HEADER: &str = "Guest ID";

/// Placeholder written when a guest leaves the dietary field empty.
pub const NO_DIETARY_NOTE: &str = "—";

const PARTNER_ID_SUFFIX: &str = "_partner";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvitationType {
    #[default]
    Single,
    Couple,
    Other(String),
}

impl From<String> for InvitationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "single" => InvitationType::Single,
            "couple" => InvitationType::Couple,
            _ => InvitationType::Other(value),
        }
    }
}

impl From<InvitationType> for String {
    fn from(value: InvitationType) -> Self {
        match value {
            InvitationType::Single => "single".to_string(),
            InvitationType::Couple => "couple".to_string(),
            InvitationType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GuestGroup {
    Family,
    #[default]
    Friends,
    Other(String),
}

impl From<String> for GuestGroup {
    fn from(value: String) -> Self {
        match value.as_str() {
            "family" => GuestGroup::Family,
            "" | "friends" => GuestGroup::Friends,
            _ => GuestGroup::Other(value),
        }
    }
}

impl From<GuestGroup> for String {
    fn from(value: GuestGroup) -> Self {
        match value {
            GuestGroup::Family => "family".to_string(),
            GuestGroup::Friends => "friends".to_string(),
            GuestGroup::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Responded,
    Other(String),
}

impl RsvpStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Responded => "responded",
            RsvpStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for RsvpStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "pending" => RsvpStatus::Pending,
            "responded" => RsvpStatus::Responded,
            _ => RsvpStatus::Other(value),
        }
    }
}

impl From<RsvpStatus> for String {
    fn from(value: RsvpStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One row of the Guests sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub guest_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub invitation_type: InvitationType,
    #[serde(default)]
    pub partner_name: String,
    #[serde(default)]
    pub partner_full_name: String,
    #[serde(default)]
    pub group: GuestGroup,
    #[serde(default)]
    pub custom_message: String,
    #[serde(default = "default_true")]
    pub show_accommodation: bool,
    #[serde(default = "default_true")]
    pub show_alcohol: bool,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
}

fn default_true() -> bool {
    true
}

impl GuestRecord {
    pub fn new(guest_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guest_id: guest_id.into(),
            name: name.into(),
            full_name: String::new(),
            invitation_type: InvitationType::Single,
            partner_name: String::new(),
            partner_full_name: String::new(),
            group: GuestGroup::Friends,
            custom_message: String::new(),
            show_accommodation: true,
            show_alcohol: true,
            rsvp_status: RsvpStatus::Pending,
        }
    }

    pub fn with_partner(mut self, name: impl Into<String>, full_name: impl Into<String>) -> Self {
        self.invitation_type = InvitationType::Couple;
        self.partner_name = name.into();
        self.partner_full_name = full_name.into();
        self
    }

    pub fn has_partner(&self) -> bool {
        !self.partner_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attendance {
    #[serde(rename = "Приду")]
    Attending,
    #[serde(rename = "Приду с партнёром")]
    AttendingWithPartner,
    #[serde(rename = "Не смогу")]
    Declined,
    /// Only written to the partner's synthesized row.
    #[serde(rename = "Приду (партнёр)")]
    PartnerOfGuest,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Attending => "Приду",
            Attendance::AttendingWithPartner => "Приду с партнёром",
            Attendance::Declined => "Не смогу",
            Attendance::PartnerOfGuest => "Приду (партнёр)",
        }
    }

    pub fn is_attending(&self) -> bool {
        !matches!(self, Attendance::Declined)
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attendance {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Приду" | "attending" => Ok(Attendance::Attending),
            "Приду с партнёром" | "with-partner" => Ok(Attendance::AttendingWithPartner),
            "Не смогу" | "declined" => Ok(Attendance::Declined),
            "Приду (партнёр)" => Ok(Attendance::PartnerOfGuest),
            other => Err(RsvpError::ValidationError {
                message: format!("Unknown attendance value: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrinkOption {
    NoAlcohol,
    WineWhiteDry,
    WineWhiteSweet,
    WineRedSweet,
    WineRedDry,
    ChampagneBrut,
    ChampagneSweet,
    CocktailsAperol,
    Cognac,
    Whiskey,
    Vodka,
    CocktailsCola,
}

impl DrinkOption {
    /// Column order of the Responses sheet.
    pub const ALL: [DrinkOption; 12] = [
        DrinkOption::NoAlcohol,
        DrinkOption::WineWhiteDry,
        DrinkOption::WineWhiteSweet,
        DrinkOption::WineRedSweet,
        DrinkOption::WineRedDry,
        DrinkOption::ChampagneBrut,
        DrinkOption::ChampagneSweet,
        DrinkOption::CocktailsAperol,
        DrinkOption::Cognac,
        DrinkOption::Whiskey,
        DrinkOption::Vodka,
        DrinkOption::CocktailsCola,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DrinkOption::NoAlcohol => "no_alcohol",
            DrinkOption::WineWhiteDry => "wine_white_dry",
            DrinkOption::WineWhiteSweet => "wine_white_sweet",
            DrinkOption::WineRedSweet => "wine_red_sweet",
            DrinkOption::WineRedDry => "wine_red_dry",
            DrinkOption::ChampagneBrut => "champagne_brut",
            DrinkOption::ChampagneSweet => "champagne_sweet",
            DrinkOption::CocktailsAperol => "cocktails_aperol",
            DrinkOption::Cognac => "cognac",
            DrinkOption::Whiskey => "whiskey",
            DrinkOption::Vodka => "vodka",
            DrinkOption::CocktailsCola => "cocktails_cola",
        }
    }
}

impl FromStr for DrinkOption {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrinkOption::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| RsvpError::ValidationError {
                message: format!("Unknown drink option: {}", s),
            })
    }
}

/// Drink checkboxes as sent by the form: one flag per option, absent
/// flags read as unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrinkSelection {
    pub no_alcohol: bool,
    pub wine_white_dry: bool,
    pub wine_white_sweet: bool,
    pub wine_red_sweet: bool,
    pub wine_red_dry: bool,
    pub champagne_brut: bool,
    pub champagne_sweet: bool,
    pub cocktails_aperol: bool,
    pub cognac: bool,
    pub whiskey: bool,
    pub vodka: bool,
    pub cocktails_cola: bool,
}

impl DrinkSelection {
    fn flag_mut(&mut self, option: DrinkOption) -> &mut bool {
        match option {
            DrinkOption::NoAlcohol => &mut self.no_alcohol,
            DrinkOption::WineWhiteDry => &mut self.wine_white_dry,
            DrinkOption::WineWhiteSweet => &mut self.wine_white_sweet,
            DrinkOption::WineRedSweet => &mut self.wine_red_sweet,
            DrinkOption::WineRedDry => &mut self.wine_red_dry,
            DrinkOption::ChampagneBrut => &mut self.champagne_brut,
            DrinkOption::ChampagneSweet => &mut self.champagne_sweet,
            DrinkOption::CocktailsAperol => &mut self.cocktails_aperol,
            DrinkOption::Cognac => &mut self.cognac,
            DrinkOption::Whiskey => &mut self.whiskey,
            DrinkOption::Vodka => &mut self.vodka,
            DrinkOption::CocktailsCola => &mut self.cocktails_cola,
        }
    }

    pub fn is_selected(&self, option: DrinkOption) -> bool {
        match option {
            DrinkOption::NoAlcohol => self.no_alcohol,
            DrinkOption::WineWhiteDry => self.wine_white_dry,
            DrinkOption::WineWhiteSweet => self.wine_white_sweet,
            DrinkOption::WineRedSweet => self.wine_red_sweet,
            DrinkOption::WineRedDry => self.wine_red_dry,
            DrinkOption::ChampagneBrut => self.champagne_brut,
            DrinkOption::ChampagneSweet => self.champagne_sweet,
            DrinkOption::CocktailsAperol => self.cocktails_aperol,
            DrinkOption::Cognac => self.cognac,
            DrinkOption::Whiskey => self.whiskey,
            DrinkOption::Vodka => self.vodka,
            DrinkOption::CocktailsCola => self.cocktails_cola,
        }
    }

    pub fn set(&mut self, option: DrinkOption, selected: bool) {
        *self.flag_mut(option) = selected;
    }

    pub fn selected(&self) -> impl Iterator<Item = DrinkOption> + '_ {
        DrinkOption::ALL
            .into_iter()
            .filter(move |option| self.is_selected(*option))
    }

    /// Sheet cells in column order: `TRUE` when checked, empty otherwise.
    pub fn to_cells(&self) -> Vec<String> {
        DrinkOption::ALL
            .iter()
            .map(|option| {
                if self.is_selected(*option) {
                    "TRUE".to_string()
                } else {
                    String::new()
                }
            })
            .collect()
    }
}

impl FromIterator<DrinkOption> for DrinkSelection {
    fn from_iter<I: IntoIterator<Item = DrinkOption>>(iter: I) -> Self {
        let mut selection = DrinkSelection::default();
        for option in iter {
            selection.set(option, true);
        }
        selection
    }
}

/// Body of an RSVP POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSubmission {
    #[serde(default)]
    pub guest_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub attendance: Attendance,
    #[serde(default)]
    pub dietary: String,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub drinks: DrinkSelection,
    #[serde(default)]
    pub partner_name: String,
    #[serde(default)]
    pub partner_dietary: String,
    #[serde(default)]
    pub partner_drinks: DrinkSelection,
}

impl RsvpSubmission {
    /// Non-empty guest id, if any.
    pub fn guest_id(&self) -> Option<&str> {
        self.guest_id.as_deref().filter(|id| !id.is_empty())
    }

    /// A partner row is written only for "with partner" answers that carry
    /// a partner name.
    pub fn includes_partner(&self) -> bool {
        !self.partner_name.is_empty() && self.attendance == Attendance::AttendingWithPartner
    }

    pub fn primary_row(&self, timestamp: DateTime<Utc>) -> ResponseRow {
        ResponseRow {
            timestamp,
            guest_id: self.guest_id().unwrap_or_default().to_string(),
            name: self.name.clone(),
            attendance: self.attendance,
            dietary: self.dietary.clone(),
            accommodation: self.accommodation.clone().unwrap_or_default(),
            drinks: self.drinks,
        }
    }

    pub fn partner_row(&self, timestamp: DateTime<Utc>) -> Option<ResponseRow> {
        if !self.includes_partner() {
            return None;
        }

        let dietary = if self.partner_dietary.is_empty() {
            NO_DIETARY_NOTE.to_string()
        } else {
            self.partner_dietary.clone()
        };

        Some(ResponseRow {
            timestamp,
            guest_id: self
                .guest_id()
                .map(|id| format!("{}{}", id, PARTNER_ID_SUFFIX))
                .unwrap_or_default(),
            name: self.partner_name.clone(),
            attendance: Attendance::PartnerOfGuest,
            dietary,
            accommodation: self.accommodation.clone().unwrap_or_default(),
            drinks: self.partner_drinks,
        })
    }
}

/// One row of the Responses sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRow {
    pub timestamp: DateTime<Utc>,
    pub guest_id: String,
    pub name: String,
    pub attendance: Attendance,
    pub dietary: String,
    pub accommodation: String,
    pub drinks: DrinkSelection,
}

impl ResponseRow {
    pub fn headers() -> Vec<String> {
        RESPONSE_BASE_HEADERS
            .iter()
            .copied()
            .chain(DrinkOption::ALL.iter().map(|option| option.key()))
            .map(str::to_string)
            .collect()
    }

    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.guest_id.clone(),
            self.name.clone(),
            self.attendance.as_str().to_string(),
            self.dietary.clone(),
            self.accommodation.clone(),
        ];
        cells.extend(self.drinks.to_cells());
        cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// What a submission wrote to the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub primary: UpsertOutcome,
    pub partner: Option<UpsertOutcome>,
    pub status_updated: bool,
}
