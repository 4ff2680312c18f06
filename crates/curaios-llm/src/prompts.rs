//! Prompt templates for entity validation and query expansion.

use curaios_common::EntityKind;

const ORGANISM_VALIDATION: &str = "You are a biology expert tasked with identifying the correct organism name. \
Given the user input '{input}', identify the most likely organism name and \
respond in JSON format like this: {\"canonical_name\": \"Homo sapiens\", \
\"ncbi_taxonomy_id\": 9606, \"confidence\": 0.95, \"alternatives\": [\"Human\"]}. \
Use standard scientific nomenclature where applicable. \
If you are unsure, set a lower confidence score.";

const DISEASE_VALIDATION: &str = "You are a medical expert tasked with identifying the correct disease name. \
Given the user input '{input}', identify the most likely disease name and \
respond in JSON format like this: {\"canonical_name\": \"Alzheimer's Disease\", \
\"mesh_id\": \"D000544\", \"confidence\": 0.95, \"alternatives\": [\"Alzheimer Disease\", \"Dementia, Alzheimer Type\"]}. \
Use standard medical terminology where applicable. \
If you are unsure, set a lower confidence score.";

const DATA_TYPE_VALIDATION: &str = "You are a bioinformatics expert tasked with identifying the correct data type. \
Given the user input '{input}', identify the most likely experimental data type and \
respond in JSON format like this: {\"canonical_name\": \"RNAseq\", \
\"confidence\": 0.95, \"alternatives\": [\"RNA sequencing\", \"Transcriptomics\"]}. \
Use standard bioinformatics terminology where applicable. \
If you are unsure, set a lower confidence score.";

const QUERY_EXPANSION: &str = "You are a bioinformatics expert tasked with expanding a search query for biomedical datasets. \
Based on these normalized inputs: \
Organism: {organism}, Disease: {disease}, Data Type: {data_type}, \
generate a comprehensive search query that would find relevant datasets. \
Include relevant synonyms, abbreviations, and related terms. \
Format your response as a JSON object with a single 'query' field containing the expanded query string.";

const NOT_SPECIFIED: &str = "Not specified";

/// Validation prompt for one entity kind.
pub fn entity_prompt(input: &str, kind: EntityKind) -> String {
    let template = match kind {
        EntityKind::Organism => ORGANISM_VALIDATION,
        EntityKind::Disease  => DISEASE_VALIDATION,
        EntityKind::DataType => DATA_TYPE_VALIDATION,
    };
    template.replace("{input}", input)
}

/// Query-expansion prompt; absent names render as "Not specified".
pub fn expansion_prompt(
    organism: Option<&str>,
    disease: Option<&str>,
    data_type: Option<&str>,
) -> String {
    QUERY_EXPANSION
        .replace("{organism}", organism.unwrap_or(NOT_SPECIFIED))
        .replace("{disease}", disease.unwrap_or(NOT_SPECIFIED))
        .replace("{data_type}", data_type.unwrap_or(NOT_SPECIFIED))
}
