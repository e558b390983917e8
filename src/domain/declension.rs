//! Declension of Russian given names.
//!
//! Names arrive in the nominative case (the form stored in the Guests sheet)
//! and are inflected on demand for display strings such as
//! "Предпочтения для Дмитрия" (genitive) or "вместе с Ильёй" (instrumental).
//!
//! The rules are a best-effort suffix table. Anything the table does not
//! recognise is returned unchanged, so a rare name degrades to its base form
//! instead of producing an error.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Feminine names ending in a soft sign. The default ending rule would read
/// them as masculine (Игорь), so they are checked first.
pub const FEMININE_SOFT_SIGN_NAMES: [&str; 6] = ["Любовь", "Нинель", "Рахиль", "Руфь", "Юдифь", "Эсфирь"];

const SOFT_SIGN: char = 'ь';

lazy_static! {
    static ref DEFAULT_DECLINER: Decliner = Decliner::default();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammaticalCase {
    /// "с кем?": Дмитрием, Анной.
    Instrumental,
    /// "кого?": Дмитрия, Анны.
    Genitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// Closed set of names that override the ending-based gender rule.
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionSet {
    names: HashSet<String>,
}

impl ExceptionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExceptionSet {
    fn default() -> Self {
        Self::new(FEMININE_SOFT_SIGN_NAMES)
    }
}

/// Ending categories in priority order. Longer suffixes come before the
/// single letters they end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    /// -ий: Дмитрий, Василий
    IiShort,
    /// -ья: Илья
    SoftYa,
    /// -й: Андрей, Сергей
    ShortI,
    /// -ь on a name from the exception set: Любовь
    FeminineSoftSign,
    /// -ь otherwise: Игорь
    MasculineSoftSign,
    /// -а after к, г, х, ж, ш, щ, ч: Ольга, Саша
    HushingA,
    /// -а: Анна
    A,
    /// -я: Мария
    Ya,
    /// hard consonant: Владимир
    Consonant,
    Unknown,
}

/// Characters removed from the end of the name and the suffix appended.
#[derive(Debug, Clone, Copy)]
struct Rewrite {
    strip: usize,
    suffix: &'static str,
}

const fn rewrite(strip: usize, suffix: &'static str) -> Option<Rewrite> {
    Some(Rewrite { strip, suffix })
}

impl Ending {
    fn rewrite(self, case: GrammaticalCase) -> Option<Rewrite> {
        use GrammaticalCase::{Genitive, Instrumental};

        match (self, case) {
            (Ending::IiShort, Instrumental) => rewrite(2, "ием"),
            (Ending::IiShort, Genitive) => rewrite(2, "ия"),
            (Ending::SoftYa, Instrumental) => rewrite(1, "ёй"),
            (Ending::SoftYa, Genitive) => rewrite(1, "и"),
            (Ending::ShortI, Instrumental) => rewrite(1, "ем"),
            (Ending::ShortI, Genitive) => rewrite(1, "я"),
            (Ending::FeminineSoftSign, Instrumental) => rewrite(0, "ю"),
            (Ending::FeminineSoftSign, Genitive) => rewrite(1, "и"),
            (Ending::MasculineSoftSign, Instrumental) => rewrite(1, "ем"),
            (Ending::MasculineSoftSign, Genitive) => rewrite(1, "я"),
            // The hushing rule only exists for the genitive.
            (Ending::HushingA, Instrumental) | (Ending::A, Instrumental) => rewrite(1, "ой"),
            (Ending::HushingA, Genitive) => rewrite(1, "и"),
            (Ending::A, Genitive) => rewrite(1, "ы"),
            (Ending::Ya, Instrumental) => rewrite(1, "ей"),
            (Ending::Ya, Genitive) => rewrite(1, "и"),
            (Ending::Consonant, Instrumental) => rewrite(0, "ом"),
            (Ending::Consonant, Genitive) => rewrite(0, "а"),
            (Ending::Unknown, _) => None,
        }
    }
}

fn is_consonant(c: char) -> bool {
    matches!(
        c,
        'б' | 'в' | 'г' | 'д' | 'ж' | 'з' | 'к' | 'л' | 'м' | 'н' | 'п' | 'р' | 'с' | 'т' | 'ф' | 'х' | 'ц' | 'ч' | 'ш' | 'щ'
    )
}

fn is_hushing_or_velar(c: char) -> bool {
    matches!(c, 'к' | 'г' | 'х' | 'ж' | 'ш' | 'щ' | 'ч')
}

/// Drops the last `count` characters (not bytes) from `name`.
fn strip_chars(name: &str, count: usize) -> &str {
    if count == 0 {
        return name;
    }
    match name.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &name[..idx],
        None => "",
    }
}

/// Declension rules bound to an exception set.
#[derive(Debug, Clone, Default)]
pub struct Decliner {
    exceptions: ExceptionSet,
}

impl Decliner {
    pub fn with_exceptions(exceptions: ExceptionSet) -> Self {
        Self { exceptions }
    }

    pub fn infer_gender(&self, name: &str) -> Gender {
        let Some(last) = name.chars().last() else {
            return Gender::Masculine;
        };

        match last.to_lowercase().next() {
            Some('а' | 'я') => Gender::Feminine,
            Some(SOFT_SIGN) if self.exceptions.contains(name) => Gender::Feminine,
            _ => Gender::Masculine,
        }
    }

    fn classify(&self, name: &str) -> Ending {
        let mut tail = name.chars().rev();
        let (Some(last), prev) = (tail.next(), tail.next()) else {
            return Ending::Unknown;
        };

        match (prev, last) {
            (Some('и'), 'й') => Ending::IiShort,
            (Some(SOFT_SIGN), 'я') => Ending::SoftYa,
            (_, 'й') => Ending::ShortI,
            (_, SOFT_SIGN) if self.exceptions.contains(name) => Ending::FeminineSoftSign,
            (_, SOFT_SIGN) => Ending::MasculineSoftSign,
            (Some(p), 'а') if is_hushing_or_velar(p) => Ending::HushingA,
            (_, 'а') => Ending::A,
            (_, 'я') => Ending::Ya,
            (_, c) if is_consonant(c) => Ending::Consonant,
            _ => Ending::Unknown,
        }
    }

    pub fn decline(&self, name: &str, case: GrammaticalCase) -> String {
        match self.classify(name).rewrite(case) {
            Some(Rewrite { strip, suffix }) => {
                let mut declined = strip_chars(name, strip).to_string();
                declined.push_str(suffix);
                declined
            }
            None => name.to_string(),
        }
    }
}

/// Infers grammatical gender from the nominative form. Names that match
/// no rule, including the empty string, are treated as masculine.
pub fn infer_gender(name: &str) -> Gender {
    DEFAULT_DECLINER.infer_gender(name)
}

pub fn decline(name: &str, case: GrammaticalCase) -> String {
    DEFAULT_DECLINER.decline(name, case)
}

/// Same as [`decline`] for values that may be absent; `None` passes through.
pub fn decline_opt(name: Option<&str>, case: GrammaticalCase) -> Option<String> {
    name.map(|n| decline(n, case))
}

pub fn to_instrumental(name: &str) -> String {
    decline(name, GrammaticalCase::Instrumental)
}

pub fn to_genitive(name: &str) -> String {
    decline(name, GrammaticalCase::Genitive)
}
