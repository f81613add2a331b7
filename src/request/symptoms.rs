//! Age/gender plus fourteen yes-no symptom answers. The backend serializer
//! expects string answers, so [`YesNo`] serializes to exactly "Yes"/"No".

use super::{coerce_int, ValidationError};
use serde::{Deserialize, Serialize};

pub const SYMPTOM_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

/// The fourteen questionnaire answers, keyed as the backend expects
/// (mixed capitalization is the backend's, not ours).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomAnswers {
    #[serde(rename = "Polyuria")]
    pub polyuria: YesNo,
    #[serde(rename = "Polydipsia")]
    pub polydipsia: YesNo,
    pub sudden_weight_loss: YesNo,
    pub weakness: YesNo,
    #[serde(rename = "Polyphagia")]
    pub polyphagia: YesNo,
    #[serde(rename = "Genital_thrush")]
    pub genital_thrush: YesNo,
    pub visual_blurring: YesNo,
    #[serde(rename = "Itching")]
    pub itching: YesNo,
    #[serde(rename = "Irritability")]
    pub irritability: YesNo,
    pub delayed_healing: YesNo,
    pub partial_paresis: YesNo,
    pub muscle_stiffness: YesNo,
    #[serde(rename = "Alopecia")]
    pub alopecia: YesNo,
    #[serde(rename = "Obesity")]
    pub obesity: YesNo,
}

impl SymptomAnswers {
    pub fn as_array(&self) -> [YesNo; SYMPTOM_COUNT] {
        [
            self.polyuria,
            self.polydipsia,
            self.sudden_weight_loss,
            self.weakness,
            self.polyphagia,
            self.genital_thrush,
            self.visual_blurring,
            self.itching,
            self.irritability,
            self.delayed_healing,
            self.partial_paresis,
            self.muscle_stiffness,
            self.alopecia,
            self.obesity,
        ]
    }

    pub fn yes_count(&self) -> usize {
        self.as_array().iter().filter(|a| a.is_yes()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomsRequest {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(flatten)]
    pub answers: SymptomAnswers,
}

impl SymptomsRequest {
    /// Gender is free text and carries no numeric signal, so it is excluded here.
    pub fn is_all_zero(&self) -> bool {
        self.age == 0 && self.answers.yes_count() == 0
    }

    /// Offline estimate: symptom share of 70 points, plus age over 40 (capped
    /// at 30) and a 10-point obesity bump, clamped to [0,100].
    pub fn heuristic_score(&self) -> u8 {
        let base =
            (self.answers.yes_count() as f64 / SYMPTOM_COUNT as f64 * 70.0).round() as u32;
        let age_boost = self.age.saturating_sub(40).min(30);
        let obesity_boost = if self.answers.obesity.is_yes() { 10 } else { 0 };
        (base + age_boost + obesity_boost).min(100) as u8
    }
}

/// Raw form values as typed on screen; age and gender are required.
#[derive(Debug, Clone, Default)]
pub struct SymptomsForm {
    pub age: String,
    pub gender: String,
    pub answers: SymptomAnswers,
}

impl SymptomsForm {
    pub fn build(&self) -> Result<SymptomsRequest, ValidationError> {
        if self.age.trim().is_empty() {
            return Err(ValidationError::MissingField("Age"));
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::MissingField("Gender"));
        }
        Ok(SymptomsRequest {
            age: coerce_int(&self.age),
            gender: capitalize(&self.gender),
            answers: self.answers,
        })
    }
}

/// "male" / "MALE" / " male " all become "Male".
fn capitalize(word: &str) -> String {
    let trimmed = word.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
