//! Eight-field Pima lab payload, serialized under the conventional dataset keys.

use super::coerce_num;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PimaRequest {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,
    #[serde(rename = "Glucose")]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: f64,
    #[serde(rename = "Insulin")]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree: f64,
    #[serde(rename = "Age")]
    pub age: f64,
}

impl PimaRequest {
    pub fn is_all_zero(&self) -> bool {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree,
            self.age,
        ]
        .iter()
        .all(|v| *v == 0.0)
    }
}

/// Raw form values as typed on screen. Fields default to "0" like the UI does,
/// so an untouched form builds the all-zero request.
#[derive(Debug, Clone)]
pub struct PimaForm {
    pub pregnancies: String,
    pub glucose: String,
    pub blood_pressure: String,
    pub skin_thickness: String,
    pub insulin: String,
    pub bmi: String,
    pub dpf: String,
    pub age: String,
}

impl Default for PimaForm {
    fn default() -> Self {
        Self {
            pregnancies: "0".to_string(),
            glucose: "0".to_string(),
            blood_pressure: "0".to_string(),
            skin_thickness: "0".to_string(),
            insulin: "0".to_string(),
            bmi: "0.0".to_string(),
            dpf: "0.0".to_string(),
            age: "0".to_string(),
        }
    }
}

impl PimaForm {
    /// Coerce every field; non-numeric entries count as 0, so this never fails.
    pub fn build(&self) -> PimaRequest {
        PimaRequest {
            pregnancies: coerce_num(&self.pregnancies),
            glucose: coerce_num(&self.glucose),
            blood_pressure: coerce_num(&self.blood_pressure),
            skin_thickness: coerce_num(&self.skin_thickness),
            insulin: coerce_num(&self.insulin),
            bmi: coerce_num(&self.bmi),
            diabetes_pedigree: coerce_num(&self.dpf),
            age: coerce_num(&self.age),
        }
    }
}
