use bytes::Bytes;

use crate::domain::{label::entities::AnalysisVariant, retrieval::value_objects::PatientProfileOverrides};

#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub image: Bytes,
    pub variant: AnalysisVariant,
    pub profile: PatientProfileOverrides,
    pub product_name: Option<String>,
}
