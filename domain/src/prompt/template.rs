//! Prompt templates for reviewer tasks

use crate::chunk::Chunk;
use crate::knowledge::ReferenceMaterial;
use crate::rubric::RubricConfig;

/// Templates for the two generation calls a reviewer makes per attempt
pub struct ReviewPromptTemplate;

impl ReviewPromptTemplate {
    /// Reviewer prompt for one chunk under one rubric.
    pub fn review_prompt(
        chunk: &Chunk,
        rubric: &RubricConfig,
        reference: &ReferenceMaterial,
    ) -> String {
        format!(
            r#"You are an expert reviewer assessing passages from documents for alignment with the policy described below.

## Primary Objective
Identify specific text segments that conflict with the policy guidelines or the reference material. Focus on substantive issues, not style.

## Context
Document Title: {title}
Page: {page}, Paragraph: {paragraph}
Text to analyze: {text}

## Knowledge Base Reference:
- Official Narrative: {narrative}
- Key Policy Points: {key_points}
- Sensitive Aspects: {sensitive_aspects}
- Recommended Terminology: {terminology}
- Authoritative Sources: {sources}

## Policy Guidelines:
{guidelines}

## Specific criteria:
{criteria}

## Decision Framework:
Only flag content if it clearly:
1. Directly contradicts the reference material
2. Violates the policy guidelines or the specific criteria
3. Uses discouraged terminology where a recommended alternative exists
4. Makes unsupported claims presented as established fact

Do not flag neutral descriptions, properly sourced analysis, or text that already uses the recommended terminology.
If evidence is insufficient or interpretation is ambiguous, recommend human review rather than flagging.

## Output Format:
```json
{{
    "issues_found": true or false,
    "problematic_text": "exact text segment that is problematic, or null",
    "observation": "why this conflicts with the reference material or guidelines, or null",
    "recommendation": "delete | rephrase | fact-check | provide references | human review, or null"
}}
```
Respond only with valid JSON. Do not include any explanation outside the JSON block."#,
            title = chunk.title.as_deref().unwrap_or("N/A"),
            page = chunk.page().unwrap_or("N/A"),
            paragraph = chunk.paragraph().unwrap_or("N/A"),
            text = chunk.text,
            narrative = reference.official_narrative(),
            key_points = reference.key_points(),
            sensitive_aspects = reference.sensitive_aspects(),
            terminology = reference.recommended_terminology(),
            sources = reference.authoritative_sources(),
            guidelines = rubric.guidelines,
            criteria = rubric.criteria,
        )
    }

    /// Grading prompt for the self-evaluation step.
    pub fn evaluation_prompt(prompt: &str, raw_response: &str) -> String {
        format!(
            r#"Evaluate the following:

Prompt given to agent:
{}

Agent's Raw Response:
"{}"

How correct and relevant is the Response to the Prompt?

Give a confidence score between 0 and 100.

Respond only with a single, valid JSON object that follows this structure:
{{"confidence": <score>}}
DO NOT include any explanation or text outside of the JSON object."#,
            prompt, raw_response
        )
    }
}
