use crate::survey::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "dashboardName")]
    pub dashboard_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// The name of the column holding each field, as written in the header row.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub identity: String,
    pub satisfaction: String,
    #[serde(rename = "interestInChange")]
    pub interest_in_change: String,
    #[serde(rename = "preferredSectors")]
    pub preferred_sectors: String,
    pub reason: String,
    pub learnings: String,
    #[serde(rename = "specificRoleInterest")]
    pub specific_role_interest: String,
    pub tenure: String,
}

// The questions of the internal NPS form, exactly as exported by Google Forms.
impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            identity: "Nome\n".to_string(),
            satisfaction: "Quão satisfeito você está na função que exerce hoje? ".to_string(),
            interest_in_change: "Você tem interesse em mudar de setor? ".to_string(),
            preferred_sectors:
                "Se tem interesse em mudar de Setor. Para qual setor você gostaria de ir?"
                    .to_string(),
            reason: "Qual o principal motivo da sua satisfação ou insatisfação com a função atual? "
                .to_string(),
            learnings: "O que você mais aprendeu ao desempenhar essa função? Sente que ainda há algo a mais para aprender? ".to_string(),
            specific_role_interest: "Alguma função específica que gostaria de realizar nessa mudança de setor ou até mesmo dentro do seu próprio setor?".to_string(),
            tenure: "Há quanto tempo você está na função atual? ".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn column(&self, field: Field) -> &str {
        match field {
            Field::Identity => &self.identity,
            Field::Satisfaction => &self.satisfaction,
            Field::InterestInChange => &self.interest_in_change,
            Field::PreferredSectors => &self.preferred_sectors,
            Field::Reason => &self.reason,
            Field::Learnings => &self.learnings,
            Field::SpecificRoleInterest => &self.specific_role_interest,
            Field::Tenure => &self.tenure,
        }
    }

    /// The filters cannot work without these columns.
    pub fn is_required(field: Field) -> bool {
        matches!(field, Field::Identity | Field::Satisfaction)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    pub employee: Option<String>,
    pub satisfaction: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "surveySources")]
    pub survey_sources: Vec<FileSource>,
    pub columns: Option<ColumnMapping>,
    pub filters: Option<FilterSettings>,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
