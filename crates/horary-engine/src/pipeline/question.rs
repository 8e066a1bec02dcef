//! Question Analyzer: maps question text to a question type,
//! third-person turning, timeframe, and the houses relevant to the matter.
//!
//! This module stops short of resolving planets — it has no chart to
//! consult. [`crate::pipeline::significator`] turns the [`QuestionShape`]
//! this module produces into a resolved [`horary_core::SignificatorDescriptor`].

use chrono::{Datelike, NaiveDate};
use horary_core::{QuestionType, Timeframe, TimeframeKind};

/// Natural significator categories for transaction questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCategory {
    Vehicle,
    RealEstate,
    Precious,
    Technology,
    Livestock,
    Maritime,
}

impl TransactionCategory {
    pub fn natural_ruler(&self) -> horary_core::Planet {
        use horary_core::Planet::*;
        match self {
            TransactionCategory::Vehicle => Sun,
            TransactionCategory::RealEstate => Moon,
            TransactionCategory::Precious => Venus,
            TransactionCategory::Technology => Mercury,
            TransactionCategory::Livestock => Mars,
            TransactionCategory::Maritime => Moon,
        }
    }
}

/// The houses and roles a question implies, before any chart exists to
/// resolve planets from them.
#[derive(Debug, Clone)]
pub struct QuestionShape {
    pub question_type: QuestionType,
    /// Houses relevant to this question, house 1 first.
    pub relevant_houses: Vec<u8>,
    pub third_person: bool,
    pub timeframe: Option<Timeframe>,
    pub querent_house: u8,
    pub quesited_house: u8,
    pub is_transaction: bool,
    pub transaction_category: Option<TransactionCategory>,
    /// Third-person education turning is active: attach student/preparation/success.
    pub education_turn: bool,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_token(tokens: &[String], word: &str) -> bool {
    tokens.iter().any(|t| t == word)
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(parts.len())
        .any(|window| window.iter().zip(parts.iter()).all(|(t, p)| t == p))
}

/// Word-boundary-aware match: single words compare by token equality (so
/// `ill` never matches inside `will`); multi-word phrases match as a
/// contiguous token run.
fn contains_any(tokens: &[String], words: &[&str]) -> bool {
    words.iter().any(|w| {
        if w.contains(' ') {
            contains_phrase(tokens, w)
        } else {
            contains_token(tokens, w)
        }
    })
}

const TRANSACTION_WORDS: &[&str] = &["sell", "selling", "sold", "buy", "buying", "bought", "trade", "trading", "sale"];
const POSSESSION_WORDS: &[&str] = &["car", "house", "property", "home", "vehicle", "land"];

const KEYWORD_TABLE: &[(QuestionType, &[&str])] = &[
    (QuestionType::LostObject, &["lost", "find", "missing", "misplaced", "stolen"]),
    (QuestionType::Marriage, &["marry", "marriage", "wedding", "engaged", "engagement", "fiance", "fiancee"]),
    (QuestionType::Pregnancy, &["pregnant", "pregnancy", "conceive", "conception", "expecting"]),
    (QuestionType::Children, &["child", "children", "baby", "kids"]),
    (QuestionType::Travel, &["travel", "trip", "journey", "voyage", "relocate", "moving abroad"]),
    (QuestionType::Gambling, &["gamble", "gambling", "bet", "betting", "lottery", "wager"]),
    (QuestionType::Funding, &["loan", "grant", "funding", "invest", "investment", "sponsor"]),
    (QuestionType::Career, &["job", "career", "promotion", "hired", "employment", "employer"]),
    (QuestionType::Health, &["sick", "ill", "illness", "disease", "surgery", "diagnosis", "recover"]),
    (QuestionType::Lawsuit, &["lawsuit", "court", "judge", "trial", "sue", "litigation", "verdict"]),
    (QuestionType::Education, &["exam", "test", "school", "university", "college", "student", "study", "degree", "graduate"]),
    (QuestionType::Relationship, &["relationship", "partner", "boyfriend", "girlfriend", "together"]),
    (QuestionType::Parent, &["mother", "father", "parent", "mom", "dad"]),
    (QuestionType::Sibling, &["brother", "sister", "sibling"]),
    (QuestionType::FriendEnemy, &["friend", "enemy", "rival"]),
    (QuestionType::Property, &["property", "land", "real estate"]),
    (QuestionType::Death, &["death", "die", "dying", "deceased", "passed away"]),
    (QuestionType::Spiritual, &["spiritual", "prayer", "meditation", "faith", "soul"]),
    (QuestionType::Money, &["money", "rich", "afford", "debt", "salary", "wage", "paid"]),
];

/// Classification rules in priority order.
fn classify_type(tokens: &[String]) -> QuestionType {
    if contains_any(tokens, TRANSACTION_WORDS) {
        return QuestionType::Money;
    }
    if contains_any(tokens, POSSESSION_WORDS) {
        return QuestionType::Money;
    }

    let matches: Vec<QuestionType> = KEYWORD_TABLE
        .iter()
        .filter(|(_, words)| contains_any(tokens, words))
        .map(|(t, _)| *t)
        .collect();

    let has_education = matches.contains(&QuestionType::Education);
    let has_lawsuit = matches.contains(&QuestionType::Lawsuit);
    if has_education && has_lawsuit {
        let education_tokens = contains_any(tokens, &["exam", "test", "student"]);
        let lawsuit_tokens = contains_any(tokens, &["court", "judge", "trial"]);
        if education_tokens && !lawsuit_tokens {
            return QuestionType::Education;
        }
        if lawsuit_tokens {
            return QuestionType::Lawsuit;
        }
    }

    matches.into_iter().next().unwrap_or(QuestionType::General)
}

const THIRD_PERSON_PRONOUNS: &[&str] = &["he", "she", "they", "his", "her", "their", "him", "them"];
const THIRD_PERSON_PHRASES: &[&str] = &["my student", "asked by his teacher", "asked by her teacher", "his teacher", "her teacher"];

fn detect_third_person(tokens: &[String]) -> bool {
    contains_any(tokens, THIRD_PERSON_PRONOUNS) || contains_any(tokens, THIRD_PERSON_PHRASES)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
}

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Timeframe extraction, with an absolute end-date bound where determinate
/// ("Will I get a job in September?" asked mid-June resolves to `specific_month`).
fn parse_timeframe(tokens: &[String], asked_on: NaiveDate) -> Option<Timeframe> {
    if contains_phrase(tokens, "next month") {
        let (year, month) = if asked_on.month() == 12 { (asked_on.year() + 1, 1) } else { (asked_on.year(), asked_on.month() + 1) };
        return Some(Timeframe {
            kind: TimeframeKind::NextMonth,
            end_date: Some(last_day_of_month(year, month)),
        });
    }
    if contains_phrase(tokens, "this week") {
        let days_until_sunday = 7 - asked_on.weekday().num_days_from_monday() as i64 - 1;
        return Some(Timeframe {
            kind: TimeframeKind::ThisWeek,
            end_date: Some(asked_on + chrono::Duration::days(days_until_sunday.max(0))),
        });
    }
    if contains_phrase(tokens, "this month") {
        return Some(Timeframe {
            kind: TimeframeKind::ThisMonth,
            end_date: Some(last_day_of_month(asked_on.year(), asked_on.month())),
        });
    }
    if contains_phrase(tokens, "this year") {
        return Some(Timeframe {
            kind: TimeframeKind::ThisYear,
            end_date: Some(NaiveDate::from_ymd_opt(asked_on.year(), 12, 31).unwrap()),
        });
    }
    if contains_token(tokens, "today") {
        return Some(Timeframe {
            kind: TimeframeKind::Today,
            end_date: Some(asked_on),
        });
    }
    for (i, name) in MONTH_NAMES.iter().enumerate() {
        if contains_token(tokens, name) {
            let month = (i + 1) as u32;
            let year = if month >= asked_on.month() { asked_on.year() } else { asked_on.year() + 1 };
            return Some(Timeframe {
                kind: TimeframeKind::SpecificMonth,
                end_date: Some(last_day_of_month(year, month)),
            });
        }
    }
    if contains_token(tokens, "soon") {
        return Some(Timeframe {
            kind: TimeframeKind::Soon,
            end_date: None,
        });
    }
    None
}

fn transaction_category(tokens: &[String]) -> Option<TransactionCategory> {
    if contains_any(tokens, &["car", "vehicle", "truck", "motorcycle"]) {
        Some(TransactionCategory::Vehicle)
    } else if contains_any(tokens, &["house", "home", "property", "land", "apartment"]) {
        Some(TransactionCategory::RealEstate)
    } else if contains_any(tokens, &["jewelry", "jewel", "ring", "gold", "diamond"]) {
        Some(TransactionCategory::Precious)
    } else if contains_any(tokens, &["computer", "phone", "laptop", "software"]) {
        Some(TransactionCategory::Technology)
    } else if contains_any(tokens, &["horse", "cattle", "cow", "livestock"]) {
        Some(TransactionCategory::Livestock)
    } else if contains_any(tokens, &["boat", "ship", "yacht"]) {
        Some(TransactionCategory::Maritime)
    } else {
        None
    }
}

/// Classical house correspondence for types not given an explicit rule
/// elsewhere. Grounded in the same traditional house doctrine as the
/// rules that are explicit (documented in DESIGN.md).
fn default_quesited_house(question_type: QuestionType, tokens: &[String]) -> u8 {
    match question_type {
        QuestionType::LostObject => 2,
        QuestionType::Marriage | QuestionType::Relationship => 7,
        QuestionType::Pregnancy | QuestionType::Children => 5,
        QuestionType::Travel => {
            if contains_any(tokens, &["abroad", "overseas", "international", "far"]) {
                9
            } else {
                3
            }
        }
        QuestionType::Gambling => 5,
        QuestionType::Funding => 8,
        QuestionType::Money => 2,
        QuestionType::Career => 10,
        QuestionType::Health => 6,
        QuestionType::Lawsuit => 7,
        QuestionType::Education => 9,
        QuestionType::Parent => 4,
        QuestionType::Sibling => 3,
        QuestionType::FriendEnemy => {
            if contains_token(tokens, "enemy") {
                12
            } else {
                11
            }
        }
        QuestionType::Property => 4,
        QuestionType::Death => 8,
        QuestionType::Spiritual => 9,
        QuestionType::General => 1,
    }
}

fn turn_house(base: u8, offset: u8) -> u8 {
    (((base as i32 - 1) + (offset as i32 - 1)).rem_euclid(12) + 1) as u8
}

/// Analyze question text into a [`QuestionShape`]. `asked_on` anchors
/// relative timeframes ("this month", "next month") to an absolute date.
pub fn analyze_question(text: &str, asked_on: NaiveDate) -> QuestionShape {
    let tokens = tokenize(text);
    let question_type = classify_type(&tokens);
    let third_person = detect_third_person(&tokens);
    let timeframe = parse_timeframe(&tokens, asked_on);
    let is_transaction = contains_any(&tokens, TRANSACTION_WORDS) || question_type == QuestionType::Money;
    let transaction_category = if is_transaction { transaction_category(&tokens) } else { None };

    let querent_house = 1u8;
    let mut quesited_house = default_quesited_house(question_type, &tokens);
    let education_turn = third_person && question_type == QuestionType::Education;

    if third_person && question_type == QuestionType::Pregnancy {
        // Third-person subject takes the 7th house seat.
        quesited_house = 7;
    } else if third_person && is_transaction && contains_any(&tokens, &["his", "her", "their"]) {
        // Partner's money: 2nd-from-7th.
        quesited_house = turn_house(7, 2);
    }

    let mut relevant_houses = vec![1u8];
    if !relevant_houses.contains(&quesited_house) {
        relevant_houses.push(quesited_house);
    }
    if question_type == QuestionType::Travel && contains_any(&tokens, &["sick", "ill", "illness"]) {
        relevant_houses.push(6);
    }
    if education_turn {
        for house in [7u8, 9, 10] {
            if !relevant_houses.contains(&house) {
                relevant_houses.push(house);
            }
        }
    }

    QuestionShape {
        question_type,
        relevant_houses,
        third_person,
        timeframe,
        querent_house,
        quesited_house,
        is_transaction,
        transaction_category,
        education_turn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn will_is_not_mistaken_for_ill() {
        let tokens = tokenize("Will he marry me?");
        assert!(!contains_token(&tokens, "ill"));
    }

    #[test]
    fn marriage_question_classified() {
        let shape = analyze_question("Will he marry me?", date(2024, 1, 1));
        assert_eq!(shape.question_type, QuestionType::Marriage);
        assert!(shape.third_person);
        assert_eq!(shape.quesited_house, 7);
    }

    #[test]
    fn pregnancy_third_person_turns_subject_to_seventh() {
        let shape = analyze_question("Is she pregnant?", date(2024, 1, 1));
        assert_eq!(shape.question_type, QuestionType::Pregnancy);
        assert!(shape.third_person);
        assert_eq!(shape.relevant_houses, vec![1, 7]);
    }

    #[test]
    fn specific_month_timeframe_computes_end_date() {
        let shape = analyze_question("Will I get a job in September?", date(2024, 6, 15));
        let timeframe = shape.timeframe.expect("timeframe expected");
        assert_eq!(timeframe.kind, TimeframeKind::SpecificMonth);
        assert_eq!(timeframe.end_date, Some(date(2024, 9, 30)));
    }

    #[test]
    fn transaction_vocabulary_forces_money_regardless_of_other_tokens() {
        let shape = analyze_question("Will I sell my house before the court date?", date(2024, 1, 1));
        assert_eq!(shape.question_type, QuestionType::Money);
    }

    #[test]
    fn education_beats_lawsuit_when_exam_tokens_present() {
        let shape = analyze_question("Will my paralegal exam go well?", date(2024, 1, 1));
        assert_eq!(shape.question_type, QuestionType::Education);
    }

    #[test]
    fn lawsuit_beats_education_when_court_tokens_present() {
        let shape = analyze_question("Will I win the lawsuit, will the judge test my patience?", date(2024, 1, 1));
        assert_eq!(shape.question_type, QuestionType::Lawsuit);
    }
}
