//! LLM prompt engineering for page classification and field extraction

use claimdesk_domain::DocumentType;

/// Build the classification prompt for one page
pub fn classification_prompt(page_text: &str) -> String {
    let mut prompt = String::with_capacity(CLASSIFICATION_INSTRUCTIONS.len() + page_text.len() + 32);
    prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
    prompt.push_str("\n\nPage text:\n");
    prompt.push_str(page_text);
    prompt.push('\n');
    prompt
}

/// Builds extraction prompts for one document type
pub struct ExtractionPromptBuilder {
    doc_type: DocumentType,
    text: String,
    field_hints: Vec<(&'static str, &'static str)>,
    notes: Vec<&'static str>,
}

impl ExtractionPromptBuilder {
    /// Create a new prompt builder over a bucket's full text
    pub fn new(doc_type: DocumentType, text: impl Into<String>) -> Self {
        Self {
            doc_type,
            text: text.into(),
            field_hints: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Attach a format hint to one field, e.g. `("date_of_service", "YYYY-MM-DD")`
    pub fn with_field_hint(mut self, field: &'static str, hint: &'static str) -> Self {
        self.field_hints.push((field, hint));
        self
    }

    /// Add a type-specific rule
    pub fn with_note(mut self, note: &'static str) -> Self {
        self.notes.push(note);
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Fields
        prompt.push_str("Extract these fields:\n");
        prompt.push_str(&format!("- type: \"{}\"\n", self.doc_type));
        for field in self.doc_type.required_fields() {
            match self.hint_for(field) {
                Some(hint) => prompt.push_str(&format!("- {} (in {})\n", field, hint)),
                None => prompt.push_str(&format!("- {}\n", field)),
            }
        }
        prompt.push('\n');

        // 3. Type-specific rules
        if !self.notes.is_empty() {
            prompt.push_str("Notes:\n");
            for note in &self.notes {
                prompt.push_str(&format!("- {}\n", note));
            }
            prompt.push('\n');
        }

        // 4. Output format
        prompt.push_str(OUTPUT_FORMAT_RULES);
        prompt.push_str("\n\n");

        // 5. The text to analyze
        prompt.push_str("Page text:\n\"\"\"\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n\"\"\"\n\n");

        prompt.push_str("Return JSON only:");
        prompt
    }

    fn hint_for(&self, field: &str) -> Option<&'static str> {
        self.field_hints
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, hint)| *hint)
    }
}

/// JSON shape description handed to providers with a structured mode
pub fn schema_hint(doc_type: &DocumentType) -> String {
    let fields: Vec<String> = doc_type
        .required_fields()
        .iter()
        .map(|field| format!("\"{}\": \"string\"", field))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are a document classifier.

Your job is to classify the page text below into one of the following types:

- "bill": Only classify as "bill" if the page includes explicit bill summary content such as invoice, hospital receipt, interim bill, Tax Invoice, In Patient Bill, bill of supply, billing summary.
- "discharge_summary": Only classify as "discharge_summary" if the page includes explicit discharge summary content such as medical summaries including surgery, diagnosis, clinical summary, medications, Patient Details or outcomes.
- "insurance_form": Only classify as "insurance_form" if the page includes explicit insurance claim content such as claim number, approval status, Health Insurance Policy, Insurance Company, Policy Holder, policy details, cashless investigation or insurer remarks.
- "id": Only classify as "id" if the page includes explicit id content such as government-issued ID cards such as Aadhaar, PAN, Government of India or insurance membership cards.

Please return only one word: either "bill", "discharge_summary", "insurance_form", or "id"."#;

const EXTRACTION_INSTRUCTIONS: &str = "You are an intelligent document parser. Given the following hospital document page, extract ONLY the requested fields and return strictly valid JSON.";

const OUTPUT_FORMAT_RULES: &str = r#"Return strictly parsable JSON:
- No markdown formatting (no ```json)
- Keys in double quotes
- No explanation or additional text"#;
